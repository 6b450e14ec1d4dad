//! Common test utilities for integration tests.
//!
//! Provides `TempTable`, an MPTCP connections table written to a real
//! temporary file so lookups go through the filesystem like they do
//! against procfs, and `MissingTable` for the kernel-without-MPTCP case.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use mptcp::table::TABLE_HEADER;
use tempfile::{NamedTempFile, TempDir};

/// A table file with automatic cleanup.
///
/// The file is deleted when the struct is dropped.
pub struct TempTable {
    file: NamedTempFile,
}

impl TempTable {
    /// Write raw contents to a fresh file.
    pub fn with_contents(contents: &[u8]) -> io::Result<Self> {
        let mut file = tempfile::Builder::new().prefix("mptcp-").tempfile()?;
        file.write_all(contents)?;
        file.flush()?;
        Ok(Self { file })
    }

    /// Write a well-formed table with the given rows.
    pub fn with_rows(rows: &[&str]) -> io::Result<Self> {
        let mut contents = format!("{}\n", TABLE_HEADER);
        for row in rows {
            contents.push_str(row);
            contents.push('\n');
        }
        Self::with_contents(contents.as_bytes())
    }

    /// Path of the table file.
    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// A path inside a fresh temporary directory where no table exists.
///
/// The directory is removed when the struct is dropped.
pub struct MissingTable {
    dir: TempDir,
}

impl MissingTable {
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    pub fn path(&self) -> PathBuf {
        self.dir.path().join("mptcp")
    }
}

/// Build a table row for an IPv4 connection with the given remote key.
pub fn row(slot: u32, remote: &str) -> String {
    format!(
        "{:4}: 5A1B2C3D 6E7F8091  0 0100007F:C350                         {}                         01 00 00000000:00000000 {}",
        slot,
        remote,
        10000 + slot
    )
}
