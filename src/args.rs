use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_DESCRIPTION"))] // Application name from Cargo metadata.
#[command(author = env!("CARGO_PKG_AUTHORS"))] // Author(s) from Cargo metadata.
#[command(version = env!("CARGO_PKG_VERSION"))] // Version from Cargo metadata.
#[command(
    about = "Registers every active IPv4 interface as an MPTCP signal endpoint.",
    long_about = "mptcp-setup: stops leftover iperf3/mptcpize helpers, flushes the MPTCP \
    endpoint table, adds one signal endpoint per non-loopback IPv4 interface, then applies \
    the scheduler and add_addr_accepted limit and prints the resulting configuration. \
    Requires root (commands are prefixed with sudo) and an MPTCP-capable kernel."
)]
pub struct Args {
    #[arg(short, long, help = "Config file (built-in defaults when omitted)")]
    pub config: Option<String>,

    #[arg(short, long, default_value = "false", help = "Enable debug mode")]
    pub debug: bool,

    #[arg(long, default_value = "false", help = "Print the commands without changing anything")]
    pub dry_run: bool,

    #[arg(long, help = "Override the MPTCP scheduler")]
    pub scheduler: Option<String>,

    #[arg(long, help = "Override the add_addr_accepted limit")]
    pub add_addr_accepted: Option<u32>,
}
