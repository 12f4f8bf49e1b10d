use std::io::{self, Write};

use tar::{Builder, EntryType, Header};

use crate::entry::{Entry, EntryKind};
use crate::error::Result;
use crate::format::Compression;
use crate::report::{Recorder, ReportEntry};

/// Writes `Compression(Tar(entries))` into `writer`.
pub(super) fn write<W: Write>(
    writer: W,
    codec: Compression,
    entries: &[Entry],
    recorder: &mut Recorder<'_>,
) -> Result<W> {
    let mut builder = Builder::new(codec.encoder(writer)?);

    for entry in entries {
        let mut header = Header::new_gnu();
        header.set_mode(carton_fs::permission_bits(entry.mode));
        header.set_mtime(entry.mtime);

        match &entry.kind {
            EntryKind::Directory => {
                header.set_entry_type(EntryType::Directory);
                header.set_size(0);
                builder.append_data(&mut header, &entry.name, io::empty())?;
            }
            EntryKind::File(opener) => {
                header.set_entry_type(EntryType::Regular);
                header.set_size(entry.size);
                let content = opener.open_exact(entry.size)?;
                builder.append_data(&mut header, &entry.name, content)?;
            }
        }
        recorder.record(ReportEntry::from(entry));
    }

    let encoder = builder.into_inner()?;
    Ok(encoder.finish()?)
}
