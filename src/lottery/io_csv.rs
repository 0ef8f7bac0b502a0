// Primitives for reading CSV files.

use std::path::Path;

use crate::lottery::io_common::{cell_text, ensure_names, simplify_file_name};
use crate::lottery::*;

/// Reads the names in the first column of a CSV file. There is no header
/// line and the rows may have any number of columns.
pub fn read_csv_names(path: &Path) -> LotteryResult<Vec<String>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu {
            path: simplify_file_name(path),
        })?;
    let mut names: Vec<String> = Vec::new();
    for (idx, line_r) in rdr.into_records().enumerate() {
        let lineno = idx + 1;
        let line = line_r.context(CsvLineParseSnafu { lineno })?;
        debug!("read_csv_names: lineno: {:?} row: {:?}", lineno, line);
        if let Some(name) = line.get(0).and_then(cell_text) {
            names.push(name);
        }
    }
    ensure_names(path, names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let p = std::env::temp_dir().join(format!("luckydraw-{}-{}", std::process::id(), name));
        fs::write(&p, contents).unwrap();
        p
    }

    #[test]
    fn first_column() {
        let p = temp_file("staff.csv", "Alice,Sales\n Bob ,IT,extra\n,Nobody\nCarol\n");
        let names = read_csv_names(&p).unwrap();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
        fs::remove_file(&p).unwrap();
    }

    #[test]
    fn empty_file() {
        let p = temp_file("empty.csv", "\n,\n");
        let err = read_csv_names(&p).unwrap_err();
        assert!(matches!(err, LotteryError::NoNamesFound { .. }));
        fs::remove_file(&p).unwrap();
    }
}
