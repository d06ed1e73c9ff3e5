use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;

use crate::error::Error;
use crate::Result;

const VIEWABLE_FILE_PATTERN: &str = r"(?i)\.(binp?|png|jpe?g|bmp|gif)$";

fn viewable_file_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(VIEWABLE_FILE_PATTERN).expect("valid viewable file pattern"))
}

pub fn is_viewable(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| viewable_file_regex().is_match(name))
}

/// The viewable file `step` places away from `path` in its directory, wrapping around.
///
/// `path` itself takes part in the ordering even when it does not exist or is
/// not viewable. A directory is browsed from the inside. Without at least one
/// other candidate the path is returned unchanged.
pub fn neighbour(path: &Path, step: isize) -> Result<PathBuf> {
    let root = if path.is_dir() {
        path
    } else {
        path.parent().unwrap_or(path)
    };
    let entries = fs::read_dir(root)
        .map_err(|e| Error::UnableToListDirectory(root.display().to_string(), e))?;
    let mut paths = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|candidate| is_viewable(candidate))
        .collect::<Vec<PathBuf>>();
    if !paths.iter().any(|candidate| candidate == path) {
        paths.push(path.to_path_buf());
    }
    paths.sort();

    if paths.len() < 2 {
        return Ok(path.to_path_buf());
    }
    let index = paths
        .iter()
        .position(|candidate| candidate == path)
        .unwrap_or_default() as isize;
    let next = (index + step).rem_euclid(paths.len() as isize) as usize;
    log::debug!("Browsing from {} to {}", path.display(), paths[next].display());
    Ok(paths[next].clone())
}
