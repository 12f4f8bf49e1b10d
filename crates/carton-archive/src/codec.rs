use std::io::{self, Read, Write};

use crate::error::Result;
use crate::format::Compression;

#[cfg(not(all(feature = "tar", feature = "bzip2", feature = "xz", feature = "lz4")))]
fn compiled_out(codec: Compression) -> crate::Error {
    crate::ArchiveFormat::Tar(codec).compiled_out()
}

impl Compression {
    /// Wrap `writer` in this codec's encoder.
    pub fn encoder<W: Write>(self, writer: W) -> Result<Encoder<W>> {
        match self {
            Self::None => Ok(Encoder::Passthrough(writer)),
            #[cfg(feature = "tar")]
            Self::Gzip => Ok(Encoder::Gzip(Box::new(flate2::write::GzEncoder::new(
                writer,
                flate2::Compression::default(),
            )))),
            #[cfg(not(feature = "tar"))]
            Self::Gzip => Err(compiled_out(self)),
            #[cfg(feature = "bzip2")]
            Self::Bzip2 => Ok(Encoder::Bzip2(Box::new(bzip2::write::BzEncoder::new(
                writer,
                bzip2::Compression::default(),
            )))),
            #[cfg(not(feature = "bzip2"))]
            Self::Bzip2 => Err(compiled_out(self)),
            #[cfg(feature = "xz")]
            Self::Xz => Ok(Encoder::Xz(Box::new(xz2::write::XzEncoder::new(writer, 6)))),
            #[cfg(not(feature = "xz"))]
            Self::Xz => Err(compiled_out(self)),
            #[cfg(feature = "lz4")]
            Self::Lz4 => Ok(Encoder::Lz4(Box::new(lz4_flex::frame::FrameEncoder::new(
                writer,
            )))),
            #[cfg(not(feature = "lz4"))]
            Self::Lz4 => Err(compiled_out(self)),
        }
    }

    /// Wrap `reader` in this codec's decoder.
    pub fn decoder<R: Read>(self, reader: R) -> Result<Decoder<R>> {
        match self {
            Self::None => Ok(Decoder::Passthrough(reader)),
            #[cfg(feature = "tar")]
            Self::Gzip => Ok(Decoder::Gzip(Box::new(flate2::read::GzDecoder::new(reader)))),
            #[cfg(not(feature = "tar"))]
            Self::Gzip => Err(compiled_out(self)),
            #[cfg(feature = "bzip2")]
            Self::Bzip2 => Ok(Decoder::Bzip2(Box::new(bzip2::read::BzDecoder::new(reader)))),
            #[cfg(not(feature = "bzip2"))]
            Self::Bzip2 => Err(compiled_out(self)),
            #[cfg(feature = "xz")]
            Self::Xz => Ok(Decoder::Xz(Box::new(xz2::read::XzDecoder::new(reader)))),
            #[cfg(not(feature = "xz"))]
            Self::Xz => Err(compiled_out(self)),
            #[cfg(feature = "lz4")]
            Self::Lz4 => Ok(Decoder::Lz4(Box::new(lz4_flex::frame::FrameDecoder::new(reader)))),
            #[cfg(not(feature = "lz4"))]
            Self::Lz4 => Err(compiled_out(self)),
        }
    }
}

/// Encoder wrapper for tar compression.
pub enum Encoder<W: Write> {
    Passthrough(W),
    #[cfg(feature = "tar")]
    Gzip(Box<flate2::write::GzEncoder<W>>),
    #[cfg(feature = "bzip2")]
    Bzip2(Box<bzip2::write::BzEncoder<W>>),
    #[cfg(feature = "xz")]
    Xz(Box<xz2::write::XzEncoder<W>>),
    #[cfg(feature = "lz4")]
    Lz4(Box<lz4_flex::frame::FrameEncoder<W>>),
}

impl<W: Write> Encoder<W> {
    /// Write the codec trailer and hand back the underlying writer.
    pub fn finish(self) -> io::Result<W> {
        match self {
            Self::Passthrough(w) => Ok(w),
            #[cfg(feature = "tar")]
            Self::Gzip(e) => e.finish(),
            #[cfg(feature = "bzip2")]
            Self::Bzip2(e) => e.finish(),
            #[cfg(feature = "xz")]
            Self::Xz(e) => e.finish(),
            #[cfg(feature = "lz4")]
            Self::Lz4(e) => e.finish().map_err(io::Error::other),
        }
    }
}

impl<W: Write> Write for Encoder<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Passthrough(w) => w.write(buf),
            #[cfg(feature = "tar")]
            Self::Gzip(e) => e.write(buf),
            #[cfg(feature = "bzip2")]
            Self::Bzip2(e) => e.write(buf),
            #[cfg(feature = "xz")]
            Self::Xz(e) => e.write(buf),
            #[cfg(feature = "lz4")]
            Self::Lz4(e) => e.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Passthrough(w) => w.flush(),
            #[cfg(feature = "tar")]
            Self::Gzip(e) => e.flush(),
            #[cfg(feature = "bzip2")]
            Self::Bzip2(e) => e.flush(),
            #[cfg(feature = "xz")]
            Self::Xz(e) => e.flush(),
            #[cfg(feature = "lz4")]
            Self::Lz4(e) => e.flush(),
        }
    }
}

/// Decoder wrapper for tar decompression.
pub enum Decoder<R: Read> {
    Passthrough(R),
    #[cfg(feature = "tar")]
    Gzip(Box<flate2::read::GzDecoder<R>>),
    #[cfg(feature = "bzip2")]
    Bzip2(Box<bzip2::read::BzDecoder<R>>),
    #[cfg(feature = "xz")]
    Xz(Box<xz2::read::XzDecoder<R>>),
    #[cfg(feature = "lz4")]
    Lz4(Box<lz4_flex::frame::FrameDecoder<R>>),
}

impl<R: Read> Read for Decoder<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Passthrough(r) => r.read(buf),
            #[cfg(feature = "tar")]
            Self::Gzip(d) => d.read(buf),
            #[cfg(feature = "bzip2")]
            Self::Bzip2(d) => d.read(buf),
            #[cfg(feature = "xz")]
            Self::Xz(d) => d.read(buf),
            #[cfg(feature = "lz4")]
            Self::Lz4(d) => d.read(buf),
        }
    }
}

#[cfg(all(test, feature = "tar", feature = "bzip2", feature = "xz", feature = "lz4"))]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CODECS: [Compression; 5] = [
        Compression::None,
        Compression::Gzip,
        Compression::Bzip2,
        Compression::Xz,
        Compression::Lz4,
    ];

    fn encode(codec: Compression, data: &[u8]) -> Vec<u8> {
        let mut encoder = codec.encoder(Vec::new()).unwrap();
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    #[test]
    fn codecs_reverse_each_other() {
        let data = b"Hello, Archive! ".repeat(64);
        for codec in CODECS {
            let encoded = encode(codec, &data);
            let mut decoded = Vec::new();
            codec
                .decoder(Cursor::new(encoded))
                .unwrap()
                .read_to_end(&mut decoded)
                .unwrap();
            assert_eq!(decoded, data, "codec {}", codec.name());
        }
    }

    #[test]
    fn passthrough_is_identity() {
        assert_eq!(encode(Compression::None, b"raw"), b"raw");
        assert!(matches!(
            Compression::None.decoder(Cursor::new(b"raw")).unwrap(),
            Decoder::Passthrough(_)
        ));
    }

    #[test]
    fn encoders_emit_their_magic() {
        assert_eq!(&encode(Compression::Gzip, b"x")[..2], &[0x1F, 0x8B]);
        assert_eq!(&encode(Compression::Bzip2, b"x")[..3], b"BZh");
        assert_eq!(
            &encode(Compression::Xz, b"x")[..6],
            &[0xFD, 0x37, 0x7A, 0x58, 0x5A, 0x00]
        );
        assert_eq!(&encode(Compression::Lz4, b"x")[..4], &[0x04, 0x22, 0x4D, 0x18]);
    }

    #[test]
    fn gzip_decoder_rejects_garbage() {
        let mut out = Vec::new();
        let result = Compression::Gzip
            .decoder(Cursor::new(vec![0xDE, 0xAD, 0xBE, 0xEF]))
            .unwrap()
            .read_to_end(&mut out);
        assert!(result.is_err());
    }
}
