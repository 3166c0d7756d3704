use std::fs;
use std::io;
use std::path::Path;

/// Create every missing parent directory of `path` so it can be opened as
/// a write target. Record names may carry nested relative paths like
/// `sub/dir/file.txt`; directories that already exist are not an error.
pub fn ensure_parent_dirs(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
