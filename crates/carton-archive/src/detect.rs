use std::io::{self, Read, Seek};
use std::path::Path;

use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::format::{ArchiveFormat, Compression, get_extension};

/// Size of a tar header block, and of the head we sniff.
const BLOCK_LEN: usize = 512;

/// Byte range of the checksum field inside a tar header.
const CHECKSUM: std::ops::Range<usize> = 148..156;

fn is_zip(head: &[u8]) -> bool {
    matches!(head, [0x50, 0x4B, 0x03, 0x04, ..] | [0x50, 0x4B, 0x05, 0x06, ..])
}

fn compression_magic(head: &[u8]) -> Option<Compression> {
    match head {
        [0x1F, 0x8B, ..] => Some(Compression::Gzip),
        [b'B', b'Z', b'h', b'1'..=b'9', ..] => Some(Compression::Bzip2),
        [0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00, ..] => Some(Compression::Xz),
        [0x04, 0x22, 0x4D, 0x18, ..] => Some(Compression::Lz4),
        _ => None,
    }
}

/// Checks that `block` starts with a tar header whose checksum is valid.
///
/// Both the POSIX unsigned byte sum and the historic signed sum are accepted.
/// An all-zero block is an end-of-archive marker, not a header.
pub fn is_tar_header(block: &[u8]) -> bool {
    let Some(block) = block.get(..BLOCK_LEN) else {
        return false;
    };
    if block.iter().all(|&b| b == 0) {
        return false;
    }
    let Some(stored) = parse_octal(&block[CHECKSUM]) else {
        return false;
    };

    let (unsigned, signed) = block
        .iter()
        .enumerate()
        .map(|(i, &b)| if CHECKSUM.contains(&i) { b' ' } else { b })
        .fold((0u64, 0i64), |(u, s), b| (u + u64::from(b), s + i64::from(b as i8)));

    stored == unsigned || i64::try_from(stored).is_ok_and(|stored| stored == signed)
}

fn parse_octal(field: &[u8]) -> Option<u64> {
    let text = std::str::from_utf8(field)
        .ok()?
        .trim_matches(|c| c == ' ' || c == '\0');
    if text.is_empty() {
        return None;
    }
    u64::from_str_radix(text, 8).ok()
}

fn read_block<R: Read>(reader: &mut R) -> io::Result<Vec<u8>> {
    let mut block = Vec::with_capacity(BLOCK_LEN);
    reader
        .by_ref()
        .take(BLOCK_LEN as u64)
        .read_to_end(&mut block)?;
    Ok(block)
}

/// Identifies the archive format from the leading bytes of `reader`.
///
/// A compression magic only counts when the decoded stream starts with a
/// valid tar header, unless that codec is not compiled in. The reader is
/// rewound before returning.
pub fn detect_from_reader<R: Read + Seek>(reader: &mut R) -> io::Result<Option<ArchiveFormat>> {
    reader.rewind()?;
    let head = read_block(reader)?;
    reader.rewind()?;

    if is_zip(&head) {
        return Ok(Some(ArchiveFormat::Zip));
    }

    if let Some(codec) = compression_magic(&head) {
        // A compiled-out codec cannot be peeled; extraction reports it instead.
        let Ok(mut decoder) = codec.decoder(&mut *reader) else {
            return Ok(Some(ArchiveFormat::Tar(codec)));
        };
        let decoded = read_block(&mut decoder);
        drop(decoder);
        reader.rewind()?;
        return Ok(match decoded {
            Ok(block) if is_tar_header(&block) => Some(ArchiveFormat::Tar(codec)),
            _ => None,
        });
    }

    Ok(is_tar_header(&head).then_some(ArchiveFormat::Tar(Compression::None)))
}

/// Detects the format of the archive at `path`, already opened as `reader`.
///
/// The extension is only a hint: content wins, and a disagreement is logged.
pub fn detect<R: Read + Seek>(
    reader: &mut R,
    path: &Path,
    diagnostics: &Diagnostics,
) -> Result<ArchiveFormat> {
    let detected = detect_from_reader(reader).map_err(|e| carton_fs::Error::read(path, e))?;
    let Some(format) = detected else {
        return Err(Error::DetectionFailed {
            path: path.to_path_buf(),
        });
    };

    let name = path.to_string_lossy();
    if let Some(hint) = ArchiveFormat::from_extension(get_extension(&name))
        && hint != format
    {
        diagnostics.hint_mismatch(path, hint, format);
    }
    Ok(format)
}

#[cfg(all(test, feature = "tar"))]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn tar_bytes() -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        let mut header = tar::Header::new_gnu();
        header.set_size(5);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, "hello.txt", &b"hello"[..])
            .unwrap();
        builder.into_inner().unwrap()
    }

    fn compressed(codec: Compression, data: &[u8]) -> Vec<u8> {
        let mut encoder = codec.encoder(Vec::new()).unwrap();
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn detect_bytes(data: Vec<u8>) -> Option<ArchiveFormat> {
        detect_from_reader(&mut Cursor::new(data)).unwrap()
    }

    #[test]
    fn detect_zip_format() {
        let mut zip_header = vec![0x50, 0x4B, 0x03, 0x04, 0x14, 0x00, 0x00, 0x00];
        zip_header.resize(32, 0);
        assert_eq!(detect_bytes(zip_header), Some(ArchiveFormat::Zip));
    }

    #[test]
    fn detect_empty_zip() {
        let mut eocd = vec![0x50, 0x4B, 0x05, 0x06];
        eocd.resize(22, 0);
        assert_eq!(detect_bytes(eocd), Some(ArchiveFormat::Zip));
    }

    #[test]
    fn detect_tar_plain_format() {
        assert_eq!(
            detect_bytes(tar_bytes()),
            Some(ArchiveFormat::Tar(Compression::None))
        );
    }

    #[cfg(all(feature = "bzip2", feature = "xz", feature = "lz4"))]
    #[test]
    fn detect_compressed_tars() {
        let tar = tar_bytes();
        for codec in [
            Compression::Gzip,
            Compression::Bzip2,
            Compression::Xz,
            Compression::Lz4,
        ] {
            assert_eq!(
                detect_bytes(compressed(codec, &tar)),
                Some(ArchiveFormat::Tar(codec)),
                "codec {}",
                codec.name()
            );
        }
    }

    #[cfg(feature = "xz")]
    #[test]
    fn compressed_non_tar_is_not_detected() {
        let payload = b"just some text, not a tar stream".repeat(32);
        assert_eq!(detect_bytes(compressed(Compression::Gzip, &payload)), None);
        assert_eq!(detect_bytes(compressed(Compression::Xz, &payload)), None);
    }

    #[test]
    fn detect_unknown_format() {
        let random_data = vec![0xDE, 0xAD, 0xBE, 0xEF, 0x00, 0x00, 0x00, 0x00];
        assert_eq!(detect_bytes(random_data), None);
    }

    #[test]
    fn detect_truncated_tar_header() {
        let tar = tar_bytes();
        assert_eq!(detect_bytes(tar[..256].to_vec()), None);
    }

    #[test]
    fn gzip_magic_with_garbage_body() {
        let data = vec![0x1F, 0x8B, 0x08, 0x00, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF];
        assert_eq!(detect_bytes(data), None);
    }

    #[test]
    fn tar_header_checksum_is_verified() {
        let mut tar = tar_bytes();
        assert!(is_tar_header(&tar));
        tar[0] ^= 0x20;
        assert!(!is_tar_header(&tar));
        assert!(!is_tar_header(&[0u8; 512]));
    }

    #[test]
    fn reader_is_rewound() {
        let mut cursor = Cursor::new(compressed(Compression::Gzip, &tar_bytes()));
        detect_from_reader(&mut cursor).unwrap();
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn detect_reports_path_on_failure() {
        let mut cursor = Cursor::new(b"plain text".to_vec());
        let err = detect(&mut cursor, Path::new("notes.zip"), &Diagnostics::detached()).unwrap_err();
        assert!(matches!(err, Error::DetectionFailed { ref path } if path == Path::new("notes.zip")));
    }

    #[test]
    fn content_wins_over_extension() {
        let mut cursor = Cursor::new(tar_bytes());
        let format = detect(&mut cursor, Path::new("misnamed.zip"), &Diagnostics::detached()).unwrap();
        assert_eq!(format, ArchiveFormat::Tar(Compression::None));
    }
}
