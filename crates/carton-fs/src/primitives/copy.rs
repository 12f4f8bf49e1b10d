use std::io;
use std::path::Path;

use crate::{Error, Result};

/// Copies the bytes of `src` into `dst`, creating or truncating it.
///
/// Returns the number of bytes copied. Metadata is not carried over.
pub fn copy(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<u64> {
    let src = src.as_ref();
    let dst = dst.as_ref();

    let mut reader = super::open(src)?;
    let mut writer = super::create(dst)?;

    let copied = io::copy(&mut reader, &mut writer).map_err(|e| Error::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source: e,
    })?;
    super::release(writer, dst)?;
    Ok(copied)
}
