//! Filesystem checks used before opening the database

use std::path::Path;

/// Check if a path exists
pub fn path_exists(path: &str) -> bool {
    Path::new(path).exists()
}

/// Check if a path exists and is a regular file (not a directory)
pub fn is_file(path: &str) -> bool {
    Path::new(path).is_file()
}
