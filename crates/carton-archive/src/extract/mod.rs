//! Materializes an identified archive under a destination directory.

use std::io::{self, Read, Seek};
use std::path::{Component, Path, PathBuf};

use carton_fs::{DEFAULT_DIR_MODE, DEFAULT_FILE_MODE, permission_bits};

use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::format::ArchiveFormat;
use crate::options::ProgressFn;
use crate::report::{ArchiveReport, Recorder, ReportEntry};

#[cfg(feature = "tar")]
mod tar;
#[cfg(feature = "zip")]
mod zip;

/// One decoded entry, not yet written to disk.
struct PendingEntry<R> {
    name: String,
    mode: Option<u32>,
    kind: PendingKind<R>,
}

enum PendingKind<R> {
    Directory,
    File(R),
    Skipped(&'static str),
}

pub struct Extractor {
    format: ArchiveFormat,
    diagnostics: Diagnostics,
    on_progress: Option<ProgressFn>,
}

impl Extractor {
    pub fn new(format: ArchiveFormat, diagnostics: Diagnostics) -> Self {
        Self {
            format,
            diagnostics,
            on_progress: None,
        }
    }

    pub fn on_progress(mut self, callback: ProgressFn) -> Self {
        self.on_progress = Some(callback);
        self
    }

    /// Extracts every entry of `reader` under `destination`, in stored order.
    ///
    /// `destination` is created with its parents when missing. The first
    /// failing entry aborts the run; entries written before it stay on disk.
    pub fn extract<R: Read + Seek>(&self, reader: R, destination: &Path) -> Result<ArchiveReport> {
        if !self.format.is_enabled() {
            return Err(self.format.compiled_out());
        }
        carton_fs::create_dirs(destination)?;

        let mut recorder = Recorder::new(
            self.format,
            None,
            &self.diagnostics,
            self.on_progress.as_ref(),
        );

        match self.format {
            #[cfg(feature = "zip")]
            ArchiveFormat::Zip => self::zip::extract(reader, destination, &mut recorder)?,
            #[cfg(not(feature = "zip"))]
            ArchiveFormat::Zip => return Err(self.format.compiled_out()),
            #[cfg(feature = "tar")]
            ArchiveFormat::Tar(codec) => {
                self::tar::extract(reader, codec, destination, &mut recorder)?
            }
            #[cfg(not(feature = "tar"))]
            ArchiveFormat::Tar(_) => return Err(self.format.compiled_out()),
        }
        Ok(recorder.finish())
    }
}

/// Joins a stored entry name onto `root`.
///
/// Root and prefix components are dropped and `.` is skipped. `..` is kept
/// as is; the result is not checked to stay under `root`.
pub fn target_path(root: &Path, name: &str) -> PathBuf {
    let mut target = root.to_path_buf();
    for component in Path::new(name).components() {
        match component {
            Component::Normal(part) => target.push(part),
            Component::ParentDir => target.push(".."),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
        }
    }
    target
}

fn materialize<R: Read>(
    root: &Path,
    pending: PendingEntry<R>,
    recorder: &mut Recorder<'_>,
) -> Result<()> {
    let target = target_path(root, &pending.name);

    let (mode, size, is_dir) = match pending.kind {
        PendingKind::Skipped(reason) => {
            recorder.skip(&pending.name, reason);
            return Ok(());
        }
        PendingKind::Directory => {
            let mode = pending.mode.map_or(DEFAULT_DIR_MODE, permission_bits);
            carton_fs::create_dirs_with_mode(&target, mode)?;
            (mode, 0, true)
        }
        PendingKind::File(mut content) => {
            let mode = pending.mode.map_or(DEFAULT_FILE_MODE, permission_bits);
            let size = write_file(&target, mode, &mut content)?;
            (mode, size, false)
        }
    };

    recorder.record(ReportEntry {
        name: pending.name,
        size,
        mode,
        is_dir,
        target_path: Some(target),
    });
    Ok(())
}

fn write_file<R: Read>(target: &Path, mode: u32, content: &mut R) -> Result<u64> {
    if let Some(parent) = target.parent() {
        carton_fs::create_dirs(parent)?;
    }
    let mut file = carton_fs::create_with_mode(target, mode)?;
    let written =
        io::copy(content, &mut file).map_err(|e| carton_fs::Error::write(target, e))?;
    // Closed on drop, unsynced.
    Ok(written)
}
