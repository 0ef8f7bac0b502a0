use std::path::Path;

use crate::lottery::io_common::{ensure_names, simplify_file_name};
use crate::lottery::*;

/// One name per line. Blank lines are skipped.
pub fn read_text_names(path: &Path) -> LotteryResult<Vec<String>> {
    let contents = fs::read_to_string(path).context(OpeningFileSnafu {
        path: simplify_file_name(path),
    })?;
    ensure_names(path, parse_participants_text(&contents))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_name_per_line() {
        let p = std::env::temp_dir().join(format!("luckydraw-{}-names.txt", std::process::id()));
        fs::write(&p, "Alice\r\n\n  Bob\nCarol  \n\n").unwrap();
        assert_eq!(read_text_names(&p).unwrap(), vec!["Alice", "Bob", "Carol"]);
        fs::remove_file(&p).unwrap();
    }
}
