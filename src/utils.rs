//! Utility functions for path handling.

use std::path::PathBuf;

/// Joins a file name to a directory path.
///
/// # Examples
///
/// ```
/// # use brewbot::utils::get_path;
/// let path = get_path("/var/brewbot", "brews");
/// assert_eq!(path, "/var/brewbot/brews");
/// ```
pub fn get_path(dir_path: &str, file_name: &str) -> String {
    let path: PathBuf = [dir_path, file_name].iter().collect();
    path.to_string_lossy().into_owned()
}
