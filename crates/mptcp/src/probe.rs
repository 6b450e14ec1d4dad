//! MPTCP support detection and connection lookup.
//!
//! [`MptcpCheck`] is the query surface. [`ProcMptcp`] answers it from the
//! Linux connection table and [`Unsupported`] stands in on every other
//! platform. [`System`] names whichever one applies to the build target.
//!
//! Every call opens, reads and closes the table on its own. Nothing is
//! cached between calls.

use std::io;
use std::path::PathBuf;

use crate::addr::encode_addr;
use crate::error::{Error, Result};
use crate::source::{PresenceCheck, ProcFile, TableSource};
use crate::table::{self, TableEntry};

/// Queries about MPTCP on the local host.
pub trait MptcpCheck {
    /// Whether an active MPTCP connection to `host:port` is listed.
    fn is_active(&self, host: &str, port: u16) -> Result<bool>;

    /// Whether the kernel exposes MPTCP connection tracking.
    fn is_supported(&self) -> Result<bool>;

    /// Every connection currently listed.
    fn connections(&self) -> Result<Vec<TableEntry>>;
}

/// Lookups against the Linux MPTCP connections table.
///
/// Both the table reader and the existence check can be replaced:
///
/// ```
/// use std::io::Cursor;
/// use mptcp::probe::{MptcpCheck, ProcMptcp};
/// use mptcp::source::from_fn;
/// use mptcp::table::TABLE_HEADER;
///
/// let table = format!(
///     "{}\n   0: 1 2  0 0100007F:1F90 0100007F:0050 01 00 00000000:00000000 1\n",
///     TABLE_HEADER
/// );
/// let mptcp = ProcMptcp::new()
///     .with_source(from_fn(move || Ok(Cursor::new(table.clone()))))
///     .with_presence(|| -> std::io::Result<()> { Ok(()) });
///
/// assert!(mptcp.is_supported()?);
/// assert!(mptcp.is_active("127.0.0.1", 80)?);
/// assert!(!mptcp.is_active("127.0.0.1", 443)?);
/// # Ok::<(), mptcp::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ProcMptcp<S = ProcFile, P = ProcFile> {
    source: S,
    presence: P,
}

impl ProcMptcp {
    /// Lookups against [`PROC_MPTCP`](crate::source::PROC_MPTCP).
    pub fn new() -> Self {
        Self::default()
    }

    /// Lookups against a table file at another path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        let file = ProcFile::new(path);
        Self {
            source: file.clone(),
            presence: file,
        }
    }
}

impl Default for ProcMptcp {
    fn default() -> Self {
        Self {
            source: ProcFile::default(),
            presence: ProcFile::default(),
        }
    }
}

impl<S, P> ProcMptcp<S, P> {
    /// Replace the table reader.
    pub fn with_source<T: TableSource>(self, source: T) -> ProcMptcp<T, P> {
        ProcMptcp {
            source,
            presence: self.presence,
        }
    }

    /// Replace the existence check.
    pub fn with_presence<Q: PresenceCheck>(self, presence: Q) -> ProcMptcp<S, Q> {
        ProcMptcp {
            source: self.source,
            presence,
        }
    }
}

impl<S: TableSource, P: PresenceCheck> MptcpCheck for ProcMptcp<S, P> {
    /// Encodes the endpoint and scans the table for it.
    ///
    /// The table is opened without checking for it first, so a missing
    /// table surfaces as an I/O "not found" error. Use
    /// [`is_supported`](MptcpCheck::is_supported) to tell that case apart.
    fn is_active(&self, host: &str, port: u16) -> Result<bool> {
        let key = encode_addr(host, port)?;
        let reader = self.source.open()?;
        table::scan(reader, key.as_str())
    }

    /// A missing table means no support and is not an error. Any other
    /// failure to stat the table is.
    fn is_supported(&self) -> Result<bool> {
        match self.presence.check() {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("MPTCP table not present");
                Ok(false)
            }
            Err(e) => Err(Error::Io(e)),
        }
    }

    fn connections(&self) -> Result<Vec<TableEntry>> {
        let reader = self.source.open()?;
        table::read_entries(reader)
    }
}

/// Null implementation for platforms without an MPTCP table.
///
/// Every query fails with [`Error::NotSupported`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl Unsupported {
    fn error() -> Error {
        Error::NotSupported(format!(
            "MPTCP lookups are not implemented on {}",
            std::env::consts::OS
        ))
    }
}

impl MptcpCheck for Unsupported {
    fn is_active(&self, _host: &str, _port: u16) -> Result<bool> {
        Err(Self::error())
    }

    fn is_supported(&self) -> Result<bool> {
        Err(Self::error())
    }

    fn connections(&self) -> Result<Vec<TableEntry>> {
        Err(Self::error())
    }
}

/// The implementation for the build target.
#[cfg(target_os = "linux")]
pub type System = ProcMptcp;

/// The implementation for the build target.
#[cfg(not(target_os = "linux"))]
pub type System = Unsupported;

/// The lookup implementation for this platform.
pub fn system() -> System {
    System::default()
}

/// Whether an active MPTCP connection to `host:port` exists on this host.
///
/// A host without MPTCP support yields an I/O "not found" error on Linux
/// and [`Error::NotSupported`] elsewhere. See [`is_supported`].
pub fn is_active(host: &str, port: u16) -> Result<bool> {
    system().is_active(host, port)
}

/// Whether this host's kernel supports MPTCP.
pub fn is_supported() -> Result<bool> {
    system().is_supported()
}

/// Every MPTCP connection listed by this host's kernel.
pub fn connections() -> Result<Vec<TableEntry>> {
    system().connections()
}
