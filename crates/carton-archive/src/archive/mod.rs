//! Serializes collected entries into a single archive stream.

use std::io::{Seek, Write};

use crate::diagnostics::Diagnostics;
use crate::entry::Entry;
use crate::error::Result;
use crate::format::ArchiveFormat;
use crate::options::ProgressFn;
use crate::report::{ArchiveReport, Recorder};

#[cfg(feature = "tar")]
mod tar;
#[cfg(feature = "zip")]
mod zip;

pub struct Archiver {
    format: ArchiveFormat,
    diagnostics: Diagnostics,
    on_progress: Option<ProgressFn>,
}

impl Archiver {
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

    /// Writes every entry, in order, and hands the finished stream back.
    ///
    /// Each file entry's opener is invoked exactly once, and its content
    /// must still be as long as when it was collected. On error the stream
    /// may hold a partial archive.
    pub fn archive<W: Write + Seek>(
        &self,
        writer: W,
        entries: &[Entry],
    ) -> Result<(W, ArchiveReport)> {
        if !self.format.is_enabled() {
            return Err(self.format.compiled_out());
        }

        let total_bytes = entries.iter().map(|e| e.size).sum();
        let mut recorder = Recorder::new(
            self.format,
            Some(total_bytes),
            &self.diagnostics,
            self.on_progress.as_ref(),
        );

        let writer = match self.format {
            #[cfg(feature = "zip")]
            ArchiveFormat::Zip => self::zip::write(writer, entries, &mut recorder)?,
            #[cfg(not(feature = "zip"))]
            ArchiveFormat::Zip => return Err(self.format.compiled_out()),
            #[cfg(feature = "tar")]
            ArchiveFormat::Tar(codec) => self::tar::write(writer, codec, entries, &mut recorder)?,
            #[cfg(not(feature = "tar"))]
            ArchiveFormat::Tar(_) => return Err(self.format.compiled_out()),
        };
        Ok((writer, recorder.finish()))
    }
}
