// Filesystem helpers shared by project and asset operations

use std::fs;
use std::io;
use std::path::Path;

/// Recursively copy every file under `src` into `dst`, creating directories as needed.
/// Existing files in `dst` are overwritten. Returns the number of files copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> io::Result<usize> {
    fs::create_dir_all(dst)?;

    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let path = entry.path();
        let target = dst.join(entry.file_name());

        if path.is_dir() {
            copied += copy_dir_recursive(&path, &target)?;
        } else {
            fs::copy(&path, &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Copy the top-level items of a template directory into `dst`,
/// substituting `placeholder` in each item name with `replacement`.
pub fn copy_template_dir(
    template: &Path,
    dst: &Path,
    placeholder: &str,
    replacement: &str,
) -> io::Result<usize> {
    fs::create_dir_all(dst)?;

    let mut copied = 0;
    for entry in fs::read_dir(template)? {
        let entry = entry?;
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().replace(placeholder, replacement);
        let target = dst.join(name);

        if path.is_dir() {
            copied += copy_dir_recursive(&path, &target)?;
        } else {
            fs::copy(&path, &target)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// True when `path` is a directory with no entries
pub fn is_dir_empty(path: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Remove a directory tree, treating "already gone" as success
pub fn remove_dir_all_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_dir_all(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
