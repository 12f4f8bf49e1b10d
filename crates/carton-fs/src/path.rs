use std::fs::{self, Metadata};
use std::io;
use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// Reports whether anything exists at `path`.
///
/// Only a definite "not found" counts as absent; any other stat failure
/// (for example a permission error on a parent) is treated as present.
pub fn exists(path: impl AsRef<Path>) -> bool {
    match fs::metadata(path.as_ref()) {
        Ok(_) => true,
        Err(e) => e.kind() != io::ErrorKind::NotFound,
    }
}

pub fn is_file(path: impl AsRef<Path>) -> bool {
    fs::metadata(path.as_ref()).is_ok_and(|m| !m.is_dir())
}

pub fn is_dir(path: impl AsRef<Path>) -> bool {
    fs::metadata(path.as_ref()).is_ok_and(|m| m.is_dir())
}

/// Stats `path`, following symlinks.
pub fn metadata(path: impl AsRef<Path>) -> Result<Metadata> {
    let path = path.as_ref();
    fs::metadata(path).map_err(|e| Error::read(path, e))
}

/// Resolves `path` against the current directory and cleans it lexically.
///
/// Symlinks are not resolved.
pub fn absolute(path: impl AsRef<Path>) -> Result<PathBuf> {
    let path = path.as_ref();
    let absolute = std::path::absolute(path).map_err(|e| Error::read(path, e))?;
    Ok(clean(&absolute))
}

/// Lexical cleanup: drops `.`, folds `name/..` pairs and repeated separators.
///
/// A `..` that cannot be folded is kept for relative paths and dropped at
/// the root of absolute ones.
pub fn clean(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::ParentDir => {
                if matches!(result.components().next_back(), Some(Component::Normal(_))) {
                    result.pop();
                } else if !result.has_root() {
                    result.push("..");
                }
            }
            Component::Normal(part) => result.push(part),
            Component::RootDir => result.push(Component::RootDir),
            Component::Prefix(prefix) => result.push(prefix.as_os_str()),
            Component::CurDir => {}
        }
    }

    if result.as_os_str().is_empty() {
        result.push(".");
    }
    result
}
