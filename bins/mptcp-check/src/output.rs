//! Output formatting for mptcp-check.

use std::io::{self, Write};

use mptcp::TableEntry;

/// Print the result of a support check.
pub fn print_supported(supported: bool, json: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if json {
        serde_json::to_writer(&mut handle, &serde_json::json!({ "supported": supported }))?;
        writeln!(handle)
    } else if supported {
        writeln!(handle, "supported")
    } else {
        writeln!(handle, "not supported")
    }
}

/// Print the result of an endpoint lookup.
pub fn print_active(host: &str, port: u16, active: bool, json: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if json {
        let output = serde_json::json!({
            "host": host,
            "port": port,
            "active": active,
        });
        serde_json::to_writer(&mut handle, &output)?;
        writeln!(handle)
    } else {
        let state = if active { "active" } else { "inactive" };
        writeln!(handle, "{}", state)
    }
}

/// Print every table entry.
pub fn print_entries(entries: &[TableEntry], json: bool) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if json {
        let json_entries: Vec<_> = entries.iter().map(entry_to_json).collect();
        serde_json::to_writer_pretty(&mut handle, &json_entries)?;
        return writeln!(handle);
    }

    if entries.is_empty() {
        return writeln!(handle, "no active MPTCP connections");
    }

    writeln!(handle, "{:<6} {:<48} {}", "Netid", "Remote", "Raw")?;
    for entry in entries {
        let netid = if entry.is_ipv6() { "mptcp6" } else { "mptcp" };
        let remote = entry
            .remote_socket_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        writeln!(handle, "{:<6} {:<48} {}", netid, remote, entry.remote_addr())?;
    }
    Ok(())
}

fn entry_to_json(entry: &TableEntry) -> serde_json::Value {
    let mut json = serde_json::to_value(entry).unwrap_or_default();
    if let Some(addr) = entry.remote_socket_addr() {
        json["remote"] = serde_json::json!({
            "address": addr.ip().to_string(),
            "port": addr.port(),
        });
    }
    json
}
