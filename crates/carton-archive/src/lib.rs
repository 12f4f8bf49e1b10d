//! Format-agnostic archive compression and extraction.
//!
//! The write path resolves a format from the destination extension, walks
//! the sources into [`Entry`] values and streams them through an
//! [`Archiver`]. The read path sniffs the archive signature with
//! [`detect`] and hands the stream to an [`Extractor`].
//!
//! Supported formats are zip and tar, the latter optionally wrapped in
//! gzip, bzip2, xz or lz4.
//!
//! ```no_run
//! use carton_archive::{compress, uncompress};
//!
//! compress(&["project"], "project.tar.xz")?;
//! let report = uncompress("project.tar.xz", "restored")?;
//! assert_eq!(report.format.name(), "tar.xz");
//! # Ok::<(), carton_archive::Error>(())
//! ```

mod archive;
mod codec;
mod collect;
mod detect;
mod diagnostics;
mod entry;
mod error;
mod extract;
mod format;
mod ops;
pub mod options;
mod report;

pub use archive::Archiver;
pub use codec::{Decoder, Encoder};
pub use collect::Collector;
pub use detect::{detect, detect_from_reader, is_tar_header};
pub use diagnostics::Diagnostics;
pub use entry::{Entry, EntryKind, ExactReader, Opener};
pub use error::{Error, Result};
pub use extract::{Extractor, target_path};
pub use format::{ArchiveFormat, Compression, SUPPORTED_EXTENSIONS, get_extension, is_supported};
pub use ops::{compress, compress_with, identify, uncompress, uncompress_with};
pub use options::{CompressOptions, ExtractOptions, Progress, ProgressFn};
pub use report::{ArchiveReport, ReportEntry};
