//! MPTCP connection check example.
//!
//! Reports whether the kernel supports MPTCP and whether a remote endpoint
//! is currently reached over an MPTCP connection.
//!
//! Run: cargo run -p mptcp --example check_connection -- 192.0.2.10 443

use mptcp::{MptcpCheck, system};

fn main() -> mptcp::Result<()> {
    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "127.0.0.1".to_string());
    let port: u16 = args
        .next()
        .and_then(|p| p.parse().ok())
        .unwrap_or(80);

    let mptcp = system();

    if !mptcp.is_supported()? {
        println!("MPTCP is not supported by this kernel.");
        return Ok(());
    }

    match mptcp.is_active(&host, port) {
        Ok(true) => println!("{}:{} is using MPTCP", host, port),
        Ok(false) => println!("{}:{} is not using MPTCP", host, port),
        Err(e) if e.is_not_supported() => println!("Cannot check {}: {}", host, e),
        Err(e) => return Err(e),
    }

    println!();
    println!("Active MPTCP connections:");
    for entry in mptcp.connections()? {
        match entry.remote_socket_addr() {
            Some(addr) => println!("  {}", addr),
            None => println!("  {} (IPv6)", entry.remote_addr()),
        }
    }

    Ok(())
}
