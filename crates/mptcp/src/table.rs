//! Parsing of the kernel MPTCP connection table.
//!
//! The table is a text pseudo-file: one fixed header line followed by one
//! whitespace-separated row per active connection. Only two columns matter
//! for lookups, the IPv6 marker and the hex-encoded remote address.
//!
//! A malformed table is never trusted for partial results. The first bad
//! row ends iteration with an error.

use std::io::{BufRead, Split};
use std::net::SocketAddrV4;

use crate::addr::decode_addr;
use crate::error::{Error, Result};

/// Header line at the top of a valid MPTCP connections table.
pub const TABLE_HEADER: &str = "  sl  loc_tok  rem_tok  v6 local_address                         remote_address                        st ns tx_queue rx_queue inode";

/// Number of columns in every row of a valid table.
pub const TABLE_COLUMNS: usize = 10;

const COL_V6: usize = 3;
const COL_REMOTE_ADDR: usize = 5;

/// A parsed row of the MPTCP connections table.
///
/// Most columns are validated for presence but not retained.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TableEntry {
    is_ipv6: bool,
    remote_addr: String,
}

impl TableEntry {
    /// Build an entry from the whitespace-separated columns of one row.
    ///
    /// Fails with [`Error::InvalidEntry`] unless there are exactly
    /// [`TABLE_COLUMNS`] fields.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        if fields.len() != TABLE_COLUMNS {
            return Err(Error::InvalidEntry {
                expected: TABLE_COLUMNS,
                actual: fields.len(),
            });
        }

        Ok(Self {
            is_ipv6: fields[COL_V6].as_ref() == "1",
            remote_addr: fields[COL_REMOTE_ADDR].as_ref().to_string(),
        })
    }

    /// Parse a single table row.
    pub fn parse_line(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        Self::from_fields(&fields)
    }

    /// Whether the connection is IPv6 (`v6` column is `1`).
    pub fn is_ipv6(&self) -> bool {
        self.is_ipv6
    }

    /// Raw `HEXHOST:HEXPORT` token from the `remote_address` column.
    pub fn remote_addr(&self) -> &str {
        &self.remote_addr
    }

    /// Decode the remote address, if this is an IPv4 row.
    pub fn remote_socket_addr(&self) -> Option<SocketAddrV4> {
        if self.is_ipv6 {
            return None;
        }
        decode_addr(&self.remote_addr).ok()
    }
}

/// Iterator over the rows of an MPTCP connections table.
///
/// The header is checked when the iterator is created. Iteration stops
/// after the first error.
///
/// Lines are read as bytes. Invalid UTF-8 in a row is replaced rather
/// than rejected, so such a row parses normally and just never matches.
pub struct Entries<R> {
    lines: Split<R>,
    done: bool,
}

/// Strip the trailing `\r` of a CRLF line.
fn trim_cr(mut line: Vec<u8>) -> Vec<u8> {
    if line.last() == Some(&b'\r') {
        line.pop();
    }
    line
}

impl<R: BufRead> Entries<R> {
    /// Validate the table header and prepare to read rows.
    ///
    /// Fails with [`Error::UnexpectedEof`] if the input is empty and with
    /// [`Error::InvalidTable`] if the first line is not [`TABLE_HEADER`].
    pub fn new(reader: R) -> Result<Self> {
        let mut lines = reader.split(b'\n');
        let header = match lines.next() {
            Some(line) => trim_cr(line?),
            None => return Err(Error::UnexpectedEof),
        };

        if header != TABLE_HEADER.as_bytes() {
            return Err(Error::InvalidTable(
                String::from_utf8_lossy(&header).into_owned(),
            ));
        }
        tracing::trace!("MPTCP table header validated");

        Ok(Self { lines, done: false })
    }
}

impl<R: BufRead> Iterator for Entries<R> {
    type Item = Result<TableEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = match self.lines.next()? {
            Ok(line) => TableEntry::parse_line(&String::from_utf8_lossy(&trim_cr(line))),
            Err(e) => Err(Error::Io(e)),
        };
        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

impl<R: BufRead> std::iter::FusedIterator for Entries<R> {}

/// Scan a table for a row whose remote address equals `key`.
///
/// Stops reading at the first match. Returns `Ok(false)` if the table is
/// exhausted without one. The comparison is exact, so `key` must already
/// be uppercase (see [`encode_addr`](crate::addr::encode_addr)).
pub fn scan<R: BufRead>(reader: R, key: &str) -> Result<bool> {
    for entry in Entries::new(reader)? {
        if entry?.remote_addr == key {
            tracing::debug!(key, "matching MPTCP connection found");
            return Ok(true);
        }
    }

    tracing::debug!(key, "no matching MPTCP connection");
    Ok(false)
}

/// Read every row of a table.
pub fn read_entries<R: BufRead>(reader: R) -> Result<Vec<TableEntry>> {
    Entries::new(reader)?.collect()
}
