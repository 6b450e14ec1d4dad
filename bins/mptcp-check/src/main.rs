//! mptcp-check - query the kernel MPTCP connection table.
//!
//! Exits 0 when the answer is yes, 1 when it is no and 2 on error, so it
//! can be used directly from health checks.

mod output;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use mptcp::MptcpCheck;

#[derive(Parser)]
#[command(name = "mptcp-check")]
#[command(about = "Query the kernel MPTCP connection table", long_about = None)]
#[command(version)]
struct Cli {
    /// Output JSON
    #[arg(short, long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check whether the kernel supports MPTCP
    Supported,

    /// Check whether a remote endpoint is using MPTCP
    Active(ActiveArgs),

    /// List active MPTCP connections
    List,
}

#[derive(Args)]
struct ActiveArgs {
    /// Remote IP address
    host: String,

    /// Remote port
    port: u16,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run(&cli, &mptcp::system()) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli, mptcp: &impl MptcpCheck) -> anyhow::Result<bool> {
    match &cli.command {
        Command::Supported => {
            let supported = mptcp.is_supported()?;
            output::print_supported(supported, cli.json)?;
            Ok(supported)
        }
        Command::Active(args) => {
            let active = mptcp.is_active(&args.host, args.port)?;
            tracing::debug!(host = %args.host, port = args.port, active, "lookup complete");
            output::print_active(&args.host, args.port, active, cli.json)?;
            Ok(active)
        }
        Command::List => {
            let entries = mptcp.connections()?;
            output::print_entries(&entries, cli.json)?;
            Ok(true)
        }
    }
}
