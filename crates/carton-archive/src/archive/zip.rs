use std::io::{self, Seek, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::entry::{Entry, EntryKind};
use crate::error::Result;
use crate::report::{Recorder, ReportEntry};

/// Entries at or above this size need zip64 extra fields.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

pub(super) fn write<W: Write + Seek>(
    writer: W,
    entries: &[Entry],
    recorder: &mut Recorder<'_>,
) -> Result<W> {
    let mut zip = ZipWriter::new(writer);

    for entry in entries {
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .unix_permissions(carton_fs::permission_bits(entry.mode))
            .large_file(entry.size >= ZIP64_THRESHOLD);

        match &entry.kind {
            EntryKind::Directory => zip.add_directory(entry.name.as_str(), options)?,
            EntryKind::File(opener) => {
                zip.start_file(entry.name.as_str(), options)?;
                io::copy(&mut opener.open_exact(entry.size)?, &mut zip)?;
            }
        }
        recorder.record(ReportEntry::from(entry));
    }

    Ok(zip.finish()?)
}
