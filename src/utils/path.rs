//! Path utilities

use std::io;
use std::path::{Path, PathBuf};

/// Make `path` absolute against the current working directory.
///
/// Symlinks are not resolved, so manifest entries keep the
/// directory the user named.
pub fn absolutize(path: &Path) -> io::Result<PathBuf> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        Ok(std::env::current_dir()?.join(path))
    }
}

/// Create `dir` and its parents if missing
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(dir)
}
