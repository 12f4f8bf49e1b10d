use std::fs::Metadata;
use std::path::{Component, Path, PathBuf};
use std::time::UNIX_EPOCH;

use walkdir::{DirEntry, WalkDir};

use crate::diagnostics::Diagnostics;
use crate::entry::{Entry, Opener};
use crate::error::Result;

/// Walks source paths into the entry list an archive is built from.
#[derive(Clone, Debug)]
pub struct Collector {
    sorted: bool,
    exclude: Option<PathBuf>,
    diagnostics: Diagnostics,
}

impl Collector {
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            sorted: false,
            exclude: None,
            diagnostics,
        }
    }

    /// Visit directory children in file-name order instead of listing order.
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// Leave `path` out of the walk, typically the archive being written.
    pub fn exclude(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude = Some(path.into());
        self
    }

    /// Collects every source root and its descendants, depth-first pre-order.
    ///
    /// Names are relative to each root's parent, so the root's basename is
    /// the top-level component. The first unreadable path aborts the walk.
    pub fn collect<P: AsRef<Path>>(&self, sources: &[P]) -> Result<Vec<Entry>> {
        let mut entries = Vec::new();
        for source in sources {
            self.collect_root(source.as_ref(), &mut entries)?;
        }
        Ok(entries)
    }

    fn collect_root(&self, source: &Path, entries: &mut Vec<Entry>) -> Result<()> {
        let root = carton_fs::absolute(source)?;
        let exclude = self
            .exclude
            .as_deref()
            .map(carton_fs::absolute)
            .transpose()?;
        let base = root.parent().unwrap_or(&root).to_path_buf();

        let mut walker = WalkDir::new(&root).follow_links(false);
        if self.sorted {
            walker = walker.sort_by_file_name();
        }

        for dent in walker {
            let dent = dent.map_err(|e| {
                let path = e.path().unwrap_or(&root).to_path_buf();
                carton_fs::Error::read(path, e.into())
            })?;

            let name = archive_name(&base, dent.path());
            if name.is_empty() {
                continue;
            }
            if exclude.as_deref() == Some(dent.path()) {
                self.diagnostics.skipped(&name, "archive destination");
                continue;
            }

            let metadata = entry_metadata(&dent)?;
            let mode = carton_fs::mode_of(&metadata);
            let mtime = mtime_of(&metadata);

            if metadata.is_dir() {
                entries.push(Entry::directory(name, mode).with_mtime(mtime));
            } else if metadata.is_file() {
                let opener = Opener::new(dent.path());
                entries.push(Entry::file(name, mode, metadata.len(), opener).with_mtime(mtime));
            } else {
                self.diagnostics.skipped(&name, "not a regular file or directory");
            }
        }
        Ok(())
    }
}

/// Metadata of the entry, resolved through symlinks.
///
/// A dangling link fails here, which aborts the walk.
fn entry_metadata(dent: &DirEntry) -> carton_fs::Result<Metadata> {
    if dent.path_is_symlink() {
        return carton_fs::metadata(dent.path());
    }
    dent.metadata()
        .map_err(|e| carton_fs::Error::read(dent.path(), e.into()))
}

fn mtime_of(metadata: &Metadata) -> u64 {
    metadata
        .modified()
        .ok()
        .and_then(|time| time.duration_since(UNIX_EPOCH).ok())
        .map_or(0, |elapsed| elapsed.as_secs())
}

/// Slash-joined path of `path` relative to `base`.
fn archive_name(base: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(base).unwrap_or(path);
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::ParentDir => parts.push("..".into()),
            Component::RootDir | Component::Prefix(_) | Component::CurDir => {}
        }
    }
    parts.join("/")
}
