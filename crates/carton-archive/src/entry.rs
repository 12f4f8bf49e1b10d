use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Deferred access to one entry's content.
///
/// Bound to a single source path when the entry is collected and not
/// touched until the archiver serializes that entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opener {
    path: PathBuf,
}

impl Opener {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a fresh read handle on the source.
    pub fn open(&self) -> carton_fs::Result<File> {
        carton_fs::open(&self.path)
    }

    /// Opens the source for exactly `size` bytes of content.
    ///
    /// Reading stops at `size` even if the file grew, and fails with
    /// `UnexpectedEof` if it shrank since it was collected.
    pub fn open_exact(&self, size: u64) -> carton_fs::Result<ExactReader<'_, File>> {
        Ok(ExactReader::new(self.open()?, size, &self.path))
    }
}

/// Reader that yields exactly `expected` bytes of `inner` or fails.
pub struct ExactReader<'a, R> {
    inner: R,
    expected: u64,
    remaining: u64,
    path: &'a Path,
}

impl<'a, R: Read> ExactReader<'a, R> {
    pub fn new(inner: R, expected: u64, path: &'a Path) -> Self {
        Self {
            inner,
            expected,
            remaining: expected,
            path,
        }
    }
}

impl<R: Read> Read for ExactReader<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.remaining == 0 || buf.is_empty() {
            return Ok(0);
        }
        let limit = usize::try_from(self.remaining).map_or(buf.len(), |r| r.min(buf.len()));
        let read = self.inner.read(&mut buf[..limit])?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "'{}' shrank while archiving: expected {} bytes, found {}",
                    self.path.display(),
                    self.expected,
                    self.expected - self.remaining
                ),
            ));
        }
        self.remaining -= read as u64;
        Ok(read)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Directory,
    File(Opener),
}

/// One file or directory headed for an archive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Slash-separated path inside the archive.
    pub name: String,
    /// Type and permission bits as read from the source.
    pub mode: u32,
    /// Content length; always 0 for directories.
    pub size: u64,
    /// Modification time in seconds since the Unix epoch.
    pub mtime: u64,
    pub kind: EntryKind,
}

impl Entry {
    pub fn directory(name: impl Into<String>, mode: u32) -> Self {
        Self {
            name: name.into(),
            mode,
            size: 0,
            mtime: 0,
            kind: EntryKind::Directory,
        }
    }

    pub fn file(name: impl Into<String>, mode: u32, size: u64, opener: Opener) -> Self {
        Self {
            name: name.into(),
            mode,
            size,
            mtime: 0,
            kind: EntryKind::File(opener),
        }
    }

    pub fn with_mtime(mut self, mtime: u64) -> Self {
        self.mtime = mtime;
        self
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory)
    }

    pub fn opener(&self) -> Option<&Opener> {
        match &self.kind {
            EntryKind::File(opener) => Some(opener),
            EntryKind::Directory => None,
        }
    }
}
