use std::io::Read;
use std::path::Path;

use tar::{Archive, EntryType};

use super::{PendingEntry, PendingKind, materialize};
use crate::error::Result;
use crate::format::Compression;
use crate::report::Recorder;

pub(super) fn extract<R: Read>(
    reader: R,
    codec: Compression,
    root: &Path,
    recorder: &mut Recorder<'_>,
) -> Result<()> {
    let mut archive = Archive::new(codec.decoder(reader)?);

    for entry in archive.entries()? {
        let entry = entry?;
        let name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let mode = entry.header().mode().ok();
        let entry_type = entry.header().entry_type();

        let kind = match entry_type {
            EntryType::Directory => PendingKind::Directory,
            EntryType::Regular | EntryType::Continuous => PendingKind::File(entry),
            other => PendingKind::Skipped(skip_reason(other)),
        };
        materialize(root, PendingEntry { name, mode, kind }, recorder)?;
    }
    Ok(())
}

fn skip_reason(entry_type: EntryType) -> &'static str {
    match entry_type {
        EntryType::Symlink => "symbolic link",
        EntryType::Link => "hard link",
        EntryType::Char | EntryType::Block => "device node",
        EntryType::Fifo => "fifo",
        EntryType::XGlobalHeader => "global pax header",
        _ => "unsupported entry type",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::format::ArchiveFormat;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn archive_with_symlink() -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());

        let mut header = tar::Header::new_gnu();
        header.set_entry_type(EntryType::Symlink);
        header.set_size(0);
        header.set_mode(0o777);
        builder
            .append_link(&mut header, "link", "target.txt")
            .unwrap();

        let mut header = tar::Header::new_gnu();
        header.set_size(5);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, "target.txt", &b"hello"[..])
            .unwrap();

        builder.into_inner().unwrap()
    }

    #[test]
    fn symlinks_are_skipped() {
        let dir = tempdir().unwrap();
        let diagnostics = Diagnostics::detached();
        let mut recorder = Recorder::new(
            ArchiveFormat::Tar(Compression::None),
            None,
            &diagnostics,
            None,
        );

        extract(
            Cursor::new(archive_with_symlink()),
            Compression::None,
            dir.path(),
            &mut recorder,
        )
        .unwrap();

        assert!(!dir.path().join("link").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("target.txt")).unwrap(),
            "hello"
        );
        assert_eq!(recorder.finish().entry_count, 1);
    }

    #[test]
    fn truncated_stream_fails() {
        let dir = tempdir().unwrap();
        let diagnostics = Diagnostics::detached();
        let mut recorder = Recorder::new(
            ArchiveFormat::Tar(Compression::None),
            None,
            &diagnostics,
            None,
        );

        let mut bytes = archive_with_symlink();
        bytes.truncate(512 + 100);
        let result = extract(Cursor::new(bytes), Compression::None, dir.path(), &mut recorder);

        assert!(result.is_err());
    }
}
