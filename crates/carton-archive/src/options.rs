use std::sync::Arc;

use crate::diagnostics::Diagnostics;

pub type ProgressFn = Arc<dyn Fn(Progress) + Send + Sync>;

#[derive(Clone, Debug)]
pub struct Progress {
    pub bytes_processed: u64,
    pub total_bytes: Option<u64>,
    pub current_entry: String,
}

impl Progress {
    pub fn percentage(&self) -> Option<f32> {
        self.total_bytes.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.bytes_processed as f32 / total as f32) * 100.0
            }
        })
    }
}

#[derive(Clone, Default)]
pub struct CompressOptions {
    /// Walk each directory in file-name order so repeated runs produce
    /// byte-identical tar archives.
    pub sorted: bool,
    pub on_progress: Option<ProgressFn>,
    pub diagnostics: Option<Diagnostics>,
}

impl CompressOptions {
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn on_progress(mut self, callback: ProgressFn) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub fn diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }
}

#[derive(Clone, Default)]
pub struct ExtractOptions {
    pub on_progress: Option<ProgressFn>,
    pub diagnostics: Option<Diagnostics>,
}

impl ExtractOptions {
    pub fn on_progress(mut self, callback: ProgressFn) -> Self {
        self.on_progress = Some(callback);
        self
    }

    pub fn diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn progress_percentage() {
        let progress = Progress {
            bytes_processed: 250,
            total_bytes: Some(1000),
            current_entry: "a.txt".to_string(),
        };
        assert_eq!(progress.percentage(), Some(25.0));

        let unknown = Progress {
            total_bytes: None,
            ..progress.clone()
        };
        assert_eq!(unknown.percentage(), None);

        let empty = Progress {
            bytes_processed: 0,
            total_bytes: Some(0),
            ..progress
        };
        assert_eq!(empty.percentage(), Some(100.0));
    }

    #[test]
    fn compress_options_builder() {
        let options = CompressOptions::default().sorted(true);
        assert!(options.sorted);
        assert!(options.on_progress.is_none());
        assert!(options.diagnostics.is_none());
    }

    #[test]
    fn extract_options_progress_callback() {
        let total = Arc::new(AtomicU64::new(0));
        let sink = Arc::clone(&total);
        let options = ExtractOptions::default().on_progress(Arc::new(move |p: Progress| {
            sink.fetch_add(p.bytes_processed, Ordering::SeqCst);
        }));

        if let Some(ref callback) = options.on_progress {
            callback(Progress {
                bytes_processed: 42,
                total_bytes: None,
                current_entry: "x".to_string(),
            });
        }
        assert_eq!(total.load(Ordering::SeqCst), 42);
    }
}
