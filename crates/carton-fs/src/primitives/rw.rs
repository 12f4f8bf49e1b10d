use std::fs::{self, File, OpenOptions};
use std::path::Path;

use crate::permissions::DEFAULT_FILE_MODE;
use crate::{Error, Result};

/// Opens `path` read-only.
pub fn open(path: impl AsRef<Path>) -> Result<File> {
    let path = path.as_ref();
    File::open(path).map_err(|e| Error::read(path, e))
}

/// Creates or truncates `path` with the platform default mode.
pub fn create(path: impl AsRef<Path>) -> Result<File> {
    let path = path.as_ref();
    File::create(path).map_err(|e| Error::write(path, e))
}

/// Creates or truncates `path` for writing.
///
/// `mode` only applies when the file is newly created and is subject to
/// the process umask. It is ignored on non-Unix platforms.
pub fn create_with_mode(path: impl AsRef<Path>, mode: u32) -> Result<File> {
    let path = path.as_ref();
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode);
    }
    #[cfg(not(unix))]
    let _ = mode;

    options.open(path).map_err(|e| Error::write(path, e))
}

/// Flushes `file` to storage and closes it.
///
/// Dropping a [`File`] swallows close errors, so writers that care call
/// this to surface them.
pub fn release(file: File, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    file.sync_all().map_err(|e| Error::write(path, e))
}

pub fn read_string(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).map_err(|e| Error::read(path, e))
}

pub fn write_string(path: impl AsRef<Path>, content: &str) -> Result<()> {
    use std::io::Write;

    let path = path.as_ref();
    let mut file = create_with_mode(path, DEFAULT_FILE_MODE)?;
    file.write_all(content.as_bytes())
        .map_err(|e| Error::write(path, e))
}
