use std::path::PathBuf;

use crate::diagnostics::Diagnostics;
use crate::entry::Entry;
use crate::format::ArchiveFormat;
use crate::options::{Progress, ProgressFn};

/// Summary of a finished compress or extract run.
#[derive(Clone, Debug)]
pub struct ArchiveReport {
    pub format: ArchiveFormat,
    pub entry_count: usize,
    pub total_bytes: u64,
    pub entries: Vec<ReportEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportEntry {
    pub name: String,
    pub size: u64,
    pub mode: u32,
    pub is_dir: bool,
    /// Where the entry landed on disk. Only set by extraction.
    pub target_path: Option<PathBuf>,
}

impl From<&Entry> for ReportEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            name: entry.name.clone(),
            size: entry.size,
            mode: entry.mode,
            is_dir: entry.is_dir(),
            target_path: None,
        }
    }
}

impl ArchiveReport {
    pub fn new(format: ArchiveFormat) -> Self {
        Self {
            format,
            entry_count: 0,
            total_bytes: 0,
            entries: Vec::new(),
        }
    }

    fn push(&mut self, entry: ReportEntry) {
        self.entry_count += 1;
        self.total_bytes += entry.size;
        self.entries.push(entry);
    }
}

/// Per-run bookkeeping shared by the archiver and the extractor.
pub(crate) struct Recorder<'a> {
    report: ArchiveReport,
    total_bytes: Option<u64>,
    diagnostics: &'a Diagnostics,
    on_progress: Option<&'a ProgressFn>,
}

impl<'a> Recorder<'a> {
    pub(crate) fn new(
        format: ArchiveFormat,
        total_bytes: Option<u64>,
        diagnostics: &'a Diagnostics,
        on_progress: Option<&'a ProgressFn>,
    ) -> Self {
        Self {
            report: ArchiveReport::new(format),
            total_bytes,
            diagnostics,
            on_progress,
        }
    }

    pub(crate) fn record(&mut self, entry: ReportEntry) {
        self.diagnostics.entry(&entry.name, entry.size, entry.is_dir);
        let current_entry = entry.name.clone();
        self.report.push(entry);

        if let Some(callback) = self.on_progress {
            callback(Progress {
                bytes_processed: self.report.total_bytes,
                total_bytes: self.total_bytes,
                current_entry,
            });
        }
    }

    pub(crate) fn skip(&self, name: &str, reason: &str) {
        self.diagnostics.skipped(name, reason);
    }

    pub(crate) fn finish(self) -> ArchiveReport {
        self.diagnostics.completed(&self.report);
        self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Opener;
    use std::sync::{Arc, Mutex};

    #[test]
    fn recorder_accumulates_report() {
        let diagnostics = Diagnostics::detached();
        let mut recorder = Recorder::new(ArchiveFormat::Zip, None, &diagnostics, None);
        recorder.record(ReportEntry::from(&Entry::directory("a", 0o755)));
        recorder.record(ReportEntry::from(&Entry::file(
            "a/b.txt",
            0o644,
            2,
            Opener::new("a/b.txt"),
        )));

        let report = recorder.finish();
        assert_eq!(report.format, ArchiveFormat::Zip);
        assert_eq!(report.entry_count, 2);
        assert_eq!(report.total_bytes, 2);
        assert!(report.entries[0].is_dir);
        assert_eq!(report.entries[1].name, "a/b.txt");
    }

    #[test]
    fn recorder_reports_progress() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let callback: ProgressFn = Arc::new(move |p: Progress| {
            sink.lock().unwrap().push((p.current_entry, p.bytes_processed));
        });

        let diagnostics = Diagnostics::detached();
        let mut recorder = Recorder::new(ArchiveFormat::Zip, Some(10), &diagnostics, Some(&callback));
        for (name, size) in [("one", 4), ("two", 6)] {
            recorder.record(ReportEntry::from(&Entry::file(name, 0o644, size, Opener::new(name))));
        }

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![("one".to_string(), 4), ("two".to_string(), 10)]
        );
    }

    #[test]
    fn collected_entries_have_no_target() {
        let entry = ReportEntry::from(&Entry::directory("bin", 0o755));
        assert!(entry.is_dir);
        assert_eq!(entry.target_path, None);
    }
}
