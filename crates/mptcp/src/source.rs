//! Where the connection table comes from.
//!
//! Lookups never touch the filesystem directly. They go through two small
//! traits so that callers and tests can substitute their own table data:
//!
//! - [`TableSource`] opens a fresh reader over the whole table.
//! - [`PresenceCheck`] reports whether the table exists at all.
//!
//! [`ProcFile`] implements both for a path on disk, by default
//! [`PROC_MPTCP`]. Closures implement them too:
//!
//! ```
//! use std::io::Cursor;
//! use mptcp::source::{TableSource, from_fn};
//!
//! let source = from_fn(|| Ok(Cursor::new("  sl ...")));
//! assert!(source.open().is_ok());
//! ```

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Location of the Linux MPTCP active connections table.
pub const PROC_MPTCP: &str = "/proc/net/mptcp";

/// Opens a reader positioned at the start of the connection table.
pub trait TableSource {
    /// Reader type returned by [`open`](TableSource::open).
    type Reader: BufRead;

    /// Open the table for reading. Each call starts from the header.
    fn open(&self) -> io::Result<Self::Reader>;
}

/// Checks whether the connection table exists.
pub trait PresenceCheck {
    /// Succeed if the table exists. Absence is reported as an
    /// [`io::ErrorKind::NotFound`] error.
    fn check(&self) -> io::Result<()>;
}

/// The connection table as a file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcFile {
    path: PathBuf,
}

impl ProcFile {
    /// A table at a custom path, e.g. procfs mounted from a host into a
    /// container.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the table file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for ProcFile {
    fn default() -> Self {
        Self::new(PROC_MPTCP)
    }
}

impl TableSource for ProcFile {
    type Reader = BufReader<File>;

    fn open(&self) -> io::Result<Self::Reader> {
        let file = File::open(&self.path)?;
        tracing::trace!(path = %self.path.display(), "opened MPTCP table");
        Ok(BufReader::new(file))
    }
}

impl PresenceCheck for ProcFile {
    fn check(&self) -> io::Result<()> {
        fs::metadata(&self.path).map(|_| ())
    }
}

/// A [`TableSource`] backed by a closure.
#[derive(Debug, Clone, Copy)]
pub struct FromFn<F>(F);

/// Wrap a closure returning a fresh reader as a [`TableSource`].
pub fn from_fn<F, R>(f: F) -> FromFn<F>
where
    F: Fn() -> io::Result<R>,
    R: BufRead,
{
    FromFn(f)
}

impl<F, R> TableSource for FromFn<F>
where
    F: Fn() -> io::Result<R>,
    R: BufRead,
{
    type Reader = R;

    fn open(&self) -> io::Result<R> {
        (self.0)()
    }
}

impl<F> PresenceCheck for F
where
    F: Fn() -> io::Result<()>,
{
    fn check(&self) -> io::Result<()> {
        self()
    }
}
