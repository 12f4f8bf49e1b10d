use std::path::Path;

use tracing::{Span, debug, info, warn};

use crate::format::ArchiveFormat;
use crate::report::ArchiveReport;

/// Logging handle for one compress or extract run.
///
/// Events are parented to the wrapped span instead of whatever span happens
/// to be current, so the caller decides where they land. Nothing here
/// touches global state; installing a subscriber is the binary's job.
#[derive(Clone, Debug)]
pub struct Diagnostics {
    span: Span,
}

impl Diagnostics {
    pub fn new(span: Span) -> Self {
        Self { span }
    }

    /// A handle whose events have no parent span.
    pub fn detached() -> Self {
        Self::new(Span::none())
    }

    /// A handle with a fresh `carton` span naming the operation and its path.
    pub fn for_operation(operation: &'static str, path: &Path) -> Self {
        Self::new(tracing::info_span!(
            "carton",
            operation,
            path = %path.display()
        ))
    }

    pub(crate) fn entry(&self, name: &str, size: u64, is_dir: bool) {
        debug!(parent: &self.span, name, size, is_dir, "entry");
    }

    pub(crate) fn skipped(&self, name: &str, reason: &str) {
        debug!(parent: &self.span, name, reason, "skipped entry");
    }

    pub(crate) fn hint_mismatch(&self, path: &Path, hint: ArchiveFormat, detected: ArchiveFormat) {
        debug!(
            parent: &self.span,
            path = %path.display(),
            %hint,
            %detected,
            "extension disagrees with content signature"
        );
    }

    pub(crate) fn completed(&self, report: &ArchiveReport) {
        info!(
            parent: &self.span,
            format = %report.format,
            entries = report.entry_count,
            bytes = report.total_bytes,
            "completed"
        );
    }

    /// Best-effort handle release failed. Reported, never escalated.
    pub(crate) fn release_failed(&self, path: &Path, error: &carton_fs::Error) {
        warn!(parent: &self.span, path = %path.display(), %error, "failed to release handle");
    }
}
