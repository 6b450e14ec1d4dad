//! Multipath TCP connection detection for Linux.
//!
//! This crate answers two questions about the local host: does the kernel
//! support MPTCP, and is a given remote `host:port` currently reached over
//! an MPTCP connection. Both are answered from the kernel's MPTCP
//! connections table at `/proc/net/mptcp`, which is re-read on every call.
//!
//! On platforms other than Linux every query fails with
//! [`Error::NotSupported`].
//!
//! # Features
//!
//! - `serde` - `Serialize` for [`TableEntry`]
//!
//! # Example
//!
//! ```no_run
//! fn main() -> mptcp::Result<()> {
//!     if !mptcp::is_supported()? {
//!         println!("kernel has no MPTCP support");
//!         return Ok(());
//!     }
//!
//!     if mptcp::is_active("192.0.2.10", 443)? {
//!         println!("192.0.2.10:443 is using MPTCP");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Testing with synthetic tables
//!
//! [`ProcMptcp`] takes its table reader and existence check as
//! substitutable parts, see [`source`].

pub mod addr;
pub mod error;
pub mod probe;
pub mod source;
pub mod table;

// Re-export common types at crate root for convenience
pub use addr::{EncodedAddr, decode_addr, encode_addr};
pub use error::{Error, Result};
pub use probe::{
    MptcpCheck, ProcMptcp, System, Unsupported, connections, is_active, is_supported, system,
};
pub use table::TableEntry;
