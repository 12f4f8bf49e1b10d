use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::Arc;

use crate::archive::Archiver;
use crate::collect::Collector;
use crate::detect::detect;
use crate::diagnostics::Diagnostics;
use crate::error::{Error, Result};
use crate::extract::Extractor;
use crate::format::ArchiveFormat;
use crate::options::{CompressOptions, ExtractOptions};
use crate::report::ArchiveReport;

/// Archives `sources` into `destination`, choosing the format from its extension.
///
/// ```no_run
/// let report = carton_archive::compress(&["docs"], "docs.tar.gz")?;
/// println!("{} entries", report.entry_count);
/// # Ok::<(), carton_archive::Error>(())
/// ```
pub fn compress<P: AsRef<Path>>(
    sources: &[P],
    destination: impl AsRef<Path>,
) -> Result<ArchiveReport> {
    compress_with(sources, destination, &CompressOptions::default())
}

pub fn compress_with<P: AsRef<Path>>(
    sources: &[P],
    destination: impl AsRef<Path>,
    options: &CompressOptions,
) -> Result<ArchiveReport> {
    let destination = destination.as_ref();
    if sources.is_empty() {
        return Err(Error::InvalidArgument("no source paths given"));
    }
    if sources.iter().any(|s| s.as_ref().as_os_str().is_empty()) {
        return Err(Error::InvalidArgument("empty source path"));
    }
    if destination.as_os_str().is_empty() {
        return Err(Error::InvalidArgument("empty destination path"));
    }

    // Resolve before touching the filesystem so a bad extension creates nothing.
    let format = ArchiveFormat::resolve(destination)?;
    let diagnostics = options
        .diagnostics
        .clone()
        .unwrap_or_else(|| Diagnostics::for_operation("compress", destination));

    let entries = Collector::new(diagnostics.clone())
        .sorted(options.sorted)
        .exclude(destination)
        .collect(sources)?;

    let file = carton_fs::create(destination)?;
    let mut archiver = Archiver::new(format, diagnostics.clone());
    if let Some(callback) = &options.on_progress {
        archiver = archiver.on_progress(Arc::clone(callback));
    }

    let (writer, report) = archiver
        .archive(BufWriter::new(file), &entries)
        .map_err(|e| Error::archiving(destination, e))?;
    let file = writer
        .into_inner()
        .map_err(|e| carton_fs::Error::write(destination, e.into_error()))
        .map_err(|e| Error::archiving(destination, e.into()))?;

    if let Err(error) = carton_fs::release(file, destination) {
        diagnostics.release_failed(destination, &error);
    }
    Ok(report)
}

/// Extracts the archive at `source` into `destination`, detecting its format from content.
pub fn uncompress(source: impl AsRef<Path>, destination: impl AsRef<Path>) -> Result<ArchiveReport> {
    uncompress_with(source, destination, &ExtractOptions::default())
}

pub fn uncompress_with(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    options: &ExtractOptions,
) -> Result<ArchiveReport> {
    let (source, destination) = (source.as_ref(), destination.as_ref());
    if source.as_os_str().is_empty() {
        return Err(Error::InvalidArgument("empty source path"));
    }
    if destination.as_os_str().is_empty() {
        return Err(Error::InvalidArgument("empty destination path"));
    }

    let diagnostics = options
        .diagnostics
        .clone()
        .unwrap_or_else(|| Diagnostics::for_operation("extract", source));

    let mut reader = BufReader::new(carton_fs::open(source)?);
    let format = detect(&mut reader, source, &diagnostics)?;

    let mut extractor = Extractor::new(format, diagnostics);
    if let Some(callback) = &options.on_progress {
        extractor = extractor.on_progress(Arc::clone(callback));
    }
    extractor
        .extract(reader, destination)
        .map_err(|e| Error::extraction(source, e))
}

/// Detects the format of the archive at `path` without extracting it.
pub fn identify(path: impl AsRef<Path>) -> Result<ArchiveFormat> {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Err(Error::InvalidArgument("empty source path"));
    }
    let mut reader = BufReader::new(carton_fs::open(path)?);
    detect(&mut reader, path, &Diagnostics::for_operation("identify", path))
}
