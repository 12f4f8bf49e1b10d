use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// Container format, with the compression envelope wrapped around tar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArchiveFormat {
    Zip,
    Tar(Compression),
}

/// Compression codec for tar archives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
    Xz,
    Lz4,
}

/// Extensions accepted by [`is_supported`].
///
/// `.sz` and `.br` are recognised here but have no writer, so
/// [`ArchiveFormat::resolve`] still rejects them.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    ".zip", ".tar", ".gz", ".tgz", ".bz2", ".xz", ".lz4", ".sz", ".br",
];

impl ArchiveFormat {
    /// Maps a destination extension (including the dot) to the format written for it.
    ///
    /// Matching is exact and case-sensitive.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            ".zip" => Some(Self::Zip),
            ".tar" => Some(Self::Tar(Compression::None)),
            ".gz" | ".tgz" => Some(Self::Tar(Compression::Gzip)),
            ".bz2" => Some(Self::Tar(Compression::Bzip2)),
            ".xz" => Some(Self::Tar(Compression::Xz)),
            ".lz4" => Some(Self::Tar(Compression::Lz4)),
            _ => None,
        }
    }

    /// Picks the format to write for `destination` from its extension alone.
    ///
    /// Formats whose codec was compiled out are rejected like unknown ones.
    pub fn resolve(destination: impl AsRef<Path>) -> Result<Self> {
        let name = destination.as_ref().to_string_lossy();
        let extension = get_extension(&name);
        Self::from_extension(extension)
            .filter(|format| format.is_enabled())
            .ok_or_else(|| Error::UnsupportedFormat {
                extension: extension.to_string(),
            })
    }

    /// Whether this build can read and write the format.
    pub fn is_enabled(self) -> bool {
        match self {
            Self::Zip => cfg!(feature = "zip"),
            Self::Tar(codec) => cfg!(feature = "tar") && codec.is_enabled(),
        }
    }

    pub(crate) fn compiled_out(self) -> Error {
        Error::UnsupportedFormat {
            extension: self.name().to_string(),
        }
    }

    pub fn compression(self) -> Compression {
        match self {
            Self::Zip => Compression::None,
            Self::Tar(codec) => codec,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::Tar(Compression::None) => "tar",
            Self::Tar(Compression::Gzip) => "tar.gz",
            Self::Tar(Compression::Bzip2) => "tar.bz2",
            Self::Tar(Compression::Xz) => "tar.xz",
            Self::Tar(Compression::Lz4) => "tar.lz4",
        }
    }
}

impl fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Compression {
    /// Whether the codec was compiled in. Gzip ships with the `tar` feature.
    pub fn is_enabled(self) -> bool {
        match self {
            Self::None => true,
            Self::Gzip => cfg!(feature = "tar"),
            Self::Bzip2 => cfg!(feature = "bzip2"),
            Self::Xz => cfg!(feature = "xz"),
            Self::Lz4 => cfg!(feature = "lz4"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gzip => "gzip",
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Lz4 => "lz4",
        }
    }
}

/// Returns the extension of the final path element, dot included.
///
/// The extension starts at the last `.` of the final element; a name
/// without a dot has an empty extension. `archive.tar.gz` yields `.gz`.
pub fn get_extension(filename: &str) -> &str {
    let start = filename
        .rfind(std::path::is_separator)
        .map_or(0, |i| i + 1);
    match filename[start..].rfind('.') {
        Some(dot) => &filename[start + dot..],
        None => "",
    }
}

/// Whether `filename` has one of the [`SUPPORTED_EXTENSIONS`].
pub fn is_supported(filename: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&get_extension(filename))
}
