use std::fmt;
use std::str::FromStr;

use crate::error::{FlowError, Result};

/// Public token registry document (Solana token list).
pub const DEFAULT_TOKEN_LIST_URL: &str =
    "https://raw.githubusercontent.com/solana-labs/token-list/main/src/tokens/solana.tokenlist.json";

/// Default streaming-service endpoint.
pub const DEFAULT_STREAM_API_URL: &str = "https://api.streamflow.finance/v2/api";

/// Commitment used for account reads.
pub const DEFAULT_COMMITMENT: &str = "confirmed";

/// Network a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    Mainnet,
    Testnet,
    Devnet,
}

impl Cluster {
    /// Chain id used by the token registry for this network.
    pub fn chain_id(self) -> u64 {
        match self {
            Cluster::Mainnet => 101,
            Cluster::Testnet => 102,
            Cluster::Devnet => 103,
        }
    }

    /// Public RPC endpoint for this network.
    pub fn default_rpc_url(self) -> &'static str {
        match self {
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com",
            Cluster::Testnet => "https://api.testnet.solana.com",
            Cluster::Devnet => "https://api.devnet.solana.com",
        }
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Cluster::Mainnet => "mainnet",
            Cluster::Testnet => "testnet",
            Cluster::Devnet => "devnet",
        };
        f.write_str(name)
    }
}

impl FromStr for Cluster {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Ok(Cluster::Mainnet),
            "testnet" => Ok(Cluster::Testnet),
            "devnet" => Ok(Cluster::Devnet),
            other => Err(FlowError::Validation(format!("unknown cluster: {other}"))),
        }
    }
}

/// Configuration for the streaming client.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Network the client is scoped to.
    pub cluster: Cluster,
    /// JSON-RPC endpoint used for token account reads.
    pub rpc_url: String,
    /// Base URL of the streaming service.
    pub stream_api_url: String,
    /// Token registry document URL.
    pub token_list_url: String,
    /// Commitment level for account reads.
    pub commitment: String,
}

impl FlowConfig {
    /// Configuration for the given cluster with public endpoints.
    pub fn for_cluster(cluster: Cluster) -> Self {
        Self {
            cluster,
            rpc_url: cluster.default_rpc_url().into(),
            stream_api_url: DEFAULT_STREAM_API_URL.into(),
            token_list_url: DEFAULT_TOKEN_LIST_URL.into(),
            commitment: DEFAULT_COMMITMENT.into(),
        }
    }

    pub fn with_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.rpc_url = url.into();
        self
    }

    pub fn with_stream_api_url(mut self, url: impl Into<String>) -> Self {
        self.stream_api_url = url.into();
        self
    }

    pub fn with_token_list_url(mut self, url: impl Into<String>) -> Self {
        self.token_list_url = url.into();
        self
    }

    /// Check that every endpoint parses as an absolute URL.
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.rpc_url)?;
        url::Url::parse(&self.stream_api_url)?;
        url::Url::parse(&self.token_list_url)?;
        Ok(())
    }
}

/// Devnet configuration with public endpoints.
pub fn devnet_config() -> FlowConfig {
    FlowConfig::for_cluster(Cluster::Devnet)
}
