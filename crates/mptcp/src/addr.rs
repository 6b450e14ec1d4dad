//! Conversion between socket addresses and the kernel's hex table keys.
//!
//! The MPTCP connection table identifies each remote endpoint by a token of
//! the form `HEXHOST:HEXPORT`. For IPv4, `HEXHOST` is the address as the
//! kernel holds it in memory on little-endian hosts: the four octets in
//! reverse order. `HEXPORT` is the port in network order.
//!
//! ```
//! use mptcp::addr::{decode_addr, encode_addr};
//!
//! let key = encode_addr("127.0.0.1", 80)?;
//! assert_eq!(key.as_str(), "0100007F:0050");
//!
//! let addr = decode_addr(key.as_str())?;
//! assert_eq!(addr.to_string(), "127.0.0.1:80");
//! # Ok::<(), mptcp::Error>(())
//! ```

use std::fmt;
use std::net::{IpAddr, Ipv4Addr, SocketAddrV4};

use winnow::error::ContextError;
use winnow::prelude::*;
use winnow::token::take_while;

use crate::error::{Error, Result};

/// Result type for winnow parsers.
type PResult<T> = core::result::Result<T, winnow::error::ErrMode<ContextError>>;

/// An encoded `HEXHOST:HEXPORT` key, always uppercase.
///
/// Compared verbatim against the `remote_address` column of the table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EncodedAddr(String);

impl EncodedAddr {
    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EncodedAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for EncodedAddr {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for EncodedAddr {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Encode a textual host and port into a table key.
///
/// Fails with [`Error::InvalidAddress`] if `host` is not an IP address and
/// with [`Error::Ipv6NotSupported`] if it is an IPv6 address.
pub fn encode_addr(host: &str, port: u16) -> Result<EncodedAddr> {
    let ip: IpAddr = host
        .parse()
        .map_err(|_| Error::InvalidAddress(host.to_string()))?;
    encode_ip(ip, port)
}

/// Encode an already-parsed IP address and port into a table key.
///
/// IPv4-mapped IPv6 addresses (`::ffff:a.b.c.d`) are treated as the IPv4
/// address they carry.
pub fn encode_ip(ip: IpAddr, port: u16) -> Result<EncodedAddr> {
    let host = host_to_hex(ip)?;
    let key = format!("{}:{}", host, port_to_hex(port));
    Ok(EncodedAddr(key.to_uppercase()))
}

/// Render an IPv4 address as 8 lowercase hex digits, least-significant
/// octet first.
fn host_to_hex(ip: IpAddr) -> Result<String> {
    let v4 = match ip {
        IpAddr::V4(v4) => v4,
        IpAddr::V6(v6) => v6.to_ipv4_mapped().ok_or(Error::Ipv6NotSupported(v6))?,
    };
    let [a, b, c, d] = v4.octets();
    Ok(format!("{:02x}{:02x}{:02x}{:02x}", d, c, b, a))
}

/// Render a port as 4 lowercase hex digits.
fn port_to_hex(port: u16) -> String {
    let buf = port.to_le_bytes();
    format!("{:02x}{:02x}", buf[1], buf[0])
}

/// Decode an IPv4 `HEXHOST:HEXPORT` token back into a socket address.
///
/// Hex digits are accepted in either case. Anything that is not exactly
/// 8 hex digits, a colon and 4 hex digits fails with
/// [`Error::InvalidAddress`].
pub fn decode_addr(token: &str) -> Result<SocketAddrV4> {
    parse_remote_addr
        .parse(token)
        .map_err(|_| Error::InvalidAddress(token.to_string()))
}

fn parse_remote_addr(input: &mut &str) -> PResult<SocketAddrV4> {
    let host = parse_hex_u32.parse_next(input)?;
    ':'.parse_next(input)?;
    let port = parse_hex_u16.parse_next(input)?;
    Ok(SocketAddrV4::new(Ipv4Addr::from(host.to_le_bytes()), port))
}

fn parse_hex_u32(input: &mut &str) -> PResult<u32> {
    take_while(8, |c: char| c.is_ascii_hexdigit())
        .try_map(|s: &str| u32::from_str_radix(s, 16))
        .parse_next(input)
}

fn parse_hex_u16(input: &mut &str) -> PResult<u16> {
    take_while(4, |c: char| c.is_ascii_hexdigit())
        .try_map(|s: &str| u16::from_str_radix(s, 16))
        .parse_next(input)
}
