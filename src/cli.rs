use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// flowdesk — create and inspect token streams from the terminal.
#[derive(Parser, Debug)]
#[command(name = "flowdesk", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Network (mainnet, testnet, devnet)
    #[arg(long, default_value = "devnet", global = true)]
    pub cluster: String,

    /// JSON-RPC endpoint; defaults to the cluster's public endpoint
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Streaming service base URL
    #[arg(long, global = true)]
    pub stream_api_url: Option<String>,

    /// Token registry document URL
    #[arg(long, global = true)]
    pub token_list_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List non-empty token balances of the wallet
    Holdings(ViewArgs),

    /// List streams where the wallet is sender or recipient
    Streams(ViewArgs),

    /// Create a new stream from the connected wallet
    Create(CreateArgs),

    /// Re-render the stream list periodically
    Watch(WatchArgs),
}

/// Arguments shared by the read-only views.
#[derive(Parser, Debug)]
pub struct ViewArgs {
    /// Show this address instead of the connected wallet
    #[arg(long)]
    pub address: Option<String>,

    /// Output as JSON lines instead of TSV
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `create` subcommand.
#[derive(Parser, Debug)]
pub struct CreateArgs {
    /// Recipient address
    #[arg(long)]
    pub recipient: String,

    /// Stream name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Token mint; defaults to the first token held
    #[arg(long)]
    pub token: Option<String>,

    /// Transfer amount in display units
    #[arg(long, default_value = "10")]
    pub amount: Decimal,

    /// Period (time step in seconds)
    #[arg(long, default_value = "1")]
    pub period: u64,

    /// Output as JSON lines instead of TSV
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `watch` subcommand.
#[derive(Parser, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Seconds between refreshes
    #[arg(long, default_value = "10")]
    pub interval: u64,
}
