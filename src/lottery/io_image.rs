use std::path::Path;

use crate::lottery::io_common::simplify_file_name;
use crate::lottery::*;

/// Images larger than this are refused.
pub const MAX_IMAGE_SIZE: u64 = 5 * 1024 * 1024;

pub fn check_image_size(path: &Path, size: u64) -> LotteryResult<()> {
    ensure!(
        size <= MAX_IMAGE_SIZE,
        ImageTooLargeSnafu {
            path: simplify_file_name(path),
            size,
            limit: MAX_IMAGE_SIZE
        }
    );
    Ok(())
}

/// Checks an image file and returns the handle stored in the session.
pub fn read_image_handle(path: &Path) -> LotteryResult<String> {
    let path_s = simplify_file_name(path);
    let meta = fs::metadata(path).context(OpeningFileSnafu {
        path: path_s.clone(),
    })?;
    check_image_size(path, meta.len())?;
    let full = fs::canonicalize(path).context(OpeningFileSnafu { path: path_s })?;
    Ok(format!("file://{}", full.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_limit() {
        let p = Path::new("banner.png");
        assert!(check_image_size(p, 0).is_ok());
        assert!(check_image_size(p, MAX_IMAGE_SIZE).is_ok());
        let err = check_image_size(p, MAX_IMAGE_SIZE + 1).unwrap_err();
        assert!(matches!(
            err,
            LotteryError::ImageTooLarge { size: 5242881, .. }
        ));
    }

    #[test]
    fn handle_of_small_image() {
        let p = std::env::temp_dir().join(format!("luckydraw-{}-prize.png", std::process::id()));
        fs::write(&p, [0x89u8, 0x50, 0x4e, 0x47]).unwrap();
        let handle = read_image_handle(&p).unwrap();
        assert!(handle.starts_with("file://"));
        assert!(handle.ends_with("prize.png"));
        fs::remove_file(&p).unwrap();

        assert!(matches!(
            read_image_handle(&p),
            Err(LotteryError::OpeningFile { .. })
        ));
    }
}
