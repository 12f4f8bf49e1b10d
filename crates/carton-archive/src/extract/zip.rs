use std::io::{Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use super::{PendingEntry, PendingKind, materialize};
use crate::error::Result;
use crate::report::Recorder;

const FILE_TYPE_MASK: u32 = 0o170000;
const SYMLINK_TYPE: u32 = 0o120000;

pub(super) fn extract<R: Read + Seek>(
    reader: R,
    root: &Path,
    recorder: &mut Recorder<'_>,
) -> Result<()> {
    let mut archive = ZipArchive::new(reader)?;

    for index in 0..archive.len() {
        let file = archive.by_index(index)?;
        let name = file.name().to_string();
        let mode = file.unix_mode();

        let kind = if file.is_dir() {
            PendingKind::Directory
        } else if mode.is_some_and(|m| m & FILE_TYPE_MASK == SYMLINK_TYPE) {
            PendingKind::Skipped("symbolic link")
        } else {
            PendingKind::File(file)
        };
        materialize(root, PendingEntry { name, mode, kind }, recorder)?;
    }
    Ok(())
}
