//! Error types for MPTCP table lookups.

use std::io;
use std::net::Ipv6Addr;

/// Result type for MPTCP operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding addresses or reading the
/// connection table.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error from opening or reading the table.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The host is not a parseable IP address.
    #[error("invalid IP address: {0}")]
    InvalidAddress(String),

    /// The host is a valid IPv6 address, which cannot be encoded yet.
    #[error("IPv6 addresses are not supported: {0}")]
    Ipv6NotSupported(Ipv6Addr),

    /// A table row does not have the required number of columns.
    #[error("invalid MPTCP connection entry: expected {expected} columns, got {actual}")]
    InvalidEntry {
        /// Required column count.
        expected: usize,
        /// Column count found on the row.
        actual: usize,
    },

    /// The table header line did not match the expected layout.
    #[error("invalid MPTCP connections table: unexpected header {0:?}")]
    InvalidTable(String),

    /// The table was empty.
    #[error("unexpected end of input: MPTCP connections table is empty")]
    UnexpectedEof,

    /// The platform has no MPTCP lookup implementation.
    #[error("operation not supported: {0}")]
    NotSupported(String),
}

impl Error {
    /// Check if this is a "not found" I/O error (ENOENT).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::NotFound)
    }

    /// Check if this is a permission error (EPERM, EACCES).
    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Io(e) if e.kind() == io::ErrorKind::PermissionDenied)
    }

    /// Check if the operation failed because it is not implemented, either
    /// for this platform or for this address family.
    pub fn is_not_supported(&self) -> bool {
        matches!(self, Self::NotSupported(_) | Self::Ipv6NotSupported(_))
    }

    /// Check if the table contents were malformed.
    pub fn is_malformed_table(&self) -> bool {
        matches!(
            self,
            Self::InvalidEntry { .. } | Self::InvalidTable(_) | Self::UnexpectedEof
        )
    }
}
