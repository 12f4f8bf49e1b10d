use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("unsupported archive format: '{extension}'")]
    UnsupportedFormat { extension: String },

    #[error("failed to identify archive format of '{path}'")]
    DetectionFailed { path: PathBuf },

    #[error(transparent)]
    Io(#[from] carton_fs::Error),

    #[error("failed to create archive '{path}': {source}")]
    ArchivingFailed { path: PathBuf, source: Box<Error> },

    #[error("failed to extract '{path}': {source}")]
    ExtractionFailed { path: PathBuf, source: Box<Error> },

    #[error("archive stream error: {0}")]
    Stream(#[from] io::Error),

    #[cfg(feature = "zip")]
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl Error {
    pub(crate) fn archiving(path: &Path, source: Error) -> Self {
        Self::ArchivingFailed {
            path: path.to_path_buf(),
            source: Box::new(source),
        }
    }

    pub(crate) fn extraction(path: &Path, source: Error) -> Self {
        Self::ExtractionFailed {
            path: path.to_path_buf(),
            source: Box::new(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
