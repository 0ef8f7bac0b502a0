use std::path::{Path, PathBuf};

use crate::lottery::*;

/// The file name without its directory, used in the messages to the operator.
pub fn simplify_file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Paths in the session file are relative to the directory of that file.
pub fn resolve_path(root_path: &Path, file_path: &str) -> PathBuf {
    root_path.join(file_path)
}

/// The text of a cell, or nothing for blank cells.
pub fn cell_text(raw: &str) -> Option<String> {
    let s = raw.trim();
    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}

/// An import that produced no name is reported as an error.
pub fn ensure_names(path: &Path, names: Vec<String>) -> LotteryResult<Vec<String>> {
    ensure!(
        !names.is_empty(),
        NoNamesFoundSnafu {
            path: simplify_file_name(path)
        }
    );
    info!(
        "Read {} names from {}",
        names.len(),
        simplify_file_name(path)
    );
    Ok(names)
}
