use std::fs::{self, DirBuilder};
use std::io;
use std::path::Path;

use crate::permissions::DEFAULT_DIR_MODE;
use crate::{Error, Result};

/// Creates `path` and any missing parents with the default directory mode.
pub fn create_dirs(path: impl AsRef<Path>) -> Result<()> {
    create_dirs_with_mode(path, DEFAULT_DIR_MODE)
}

/// Creates `path` and any missing parents.
///
/// `mode` applies to every directory this call creates, subject to the
/// umask. Directories that already exist keep their mode.
pub fn create_dirs_with_mode(path: impl AsRef<Path>, mode: u32) -> Result<()> {
    let path = path.as_ref();
    let mut builder = DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    builder.create(path).map_err(|e| Error::CreateDir {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Removes a file or a whole directory tree. A missing path is not an error.
pub fn remove(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let result = match fs::symlink_metadata(path) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(path),
        Ok(_) => fs::remove_file(path),
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Remove {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
