//! Token directory: mint address -> display metadata.
//!
//! Built once per session from the remote registry (filtered to one chain id)
//! with a small curated table layered on top. Absence of a mint is a normal
//! answer, not an error.

use std::collections::HashMap;

use tracing::{info, warn};

use crate::rest::FlowHttpClient;
use crate::types::{TokenList, TokenListEntry, TokenMetadata};

const DEVNET_CHAIN_ID: u64 = 103;
const STREAMFLOW_ICON: &str = "https://streamflow.finance/public/img/icon.png";

/// Curated devnet tokens that are missing from the public registry.
pub fn static_overrides() -> Vec<TokenMetadata> {
    let entry = |address: &str, symbol: &str, name: &str, logo_uri: &str| TokenMetadata {
        address: address.into(),
        symbol: symbol.into(),
        name: name.into(),
        logo_uri: logo_uri.into(),
        decimals: 9,
        chain_id: DEVNET_CHAIN_ID,
    };

    vec![
        entry(
            "AhitdMW8uWA5tfkRxv4zbRw7dN4sqdqgeVHHCjFo2u9G",
            "KIDA",
            "KIDALICA",
            STREAMFLOW_ICON,
        ),
        entry(
            "B8DVFHFWFKtqXcN7Up5MyTJNsqSZTSTQw4totxGEJ3Q5",
            "TEST",
            "TEST",
            "https://raw.githubusercontent.com/millionsy/token-list/main/assets/mainnet/HDLRMKW1FDz2q5Zg778CZx26UgrtnqpUDkNNJHhmVUFr/logo.png",
        ),
        entry(
            "FGHYWaEkycB1bhkQKN7GqJTzySgQzFgvdFc8RuVzmkNF",
            "META",
            "META",
            STREAMFLOW_ICON,
        ),
        entry(
            "Gssm3vfi8s65R31SBdmQRq6cKeYojGgup7whkw4VCiQj",
            "STRM",
            "STREAMFLOW",
            "https://static-content-23313.s3.amazonaws.com/logo.c4294b7c.png",
        ),
    ]
}

/// Immutable mint -> metadata map for one network.
#[derive(Debug, Clone, Default)]
pub struct TokenDirectory {
    tokens: HashMap<String, TokenMetadata>,
}

impl TokenDirectory {
    /// A directory containing only the given entries.
    pub fn from_metadata(entries: impl IntoIterator<Item = TokenMetadata>) -> Self {
        let tokens = entries
            .into_iter()
            .map(|m| (m.address.clone(), m))
            .collect();
        Self { tokens }
    }

    /// The curated table alone, used when the registry is unreachable.
    pub fn static_only() -> Self {
        Self::from_metadata(static_overrides())
    }

    /// Merge registry entries for `chain_id` with the curated table.
    ///
    /// Curated entries replace registry entries with the same address.
    pub fn from_entries(remote: Vec<TokenListEntry>, chain_id: u64) -> Self {
        let mut tokens: HashMap<String, TokenMetadata> = remote
            .into_iter()
            .filter(|e| e.chain_id == chain_id)
            .map(|e| (e.address.clone(), TokenMetadata::from(e)))
            .collect();

        for meta in static_overrides() {
            tokens.insert(meta.address.clone(), meta);
        }

        Self { tokens }
    }

    /// Fetch the registry document and build the directory.
    ///
    /// A failed fetch degrades to [`TokenDirectory::static_only`].
    pub async fn load(http: &FlowHttpClient, url: &str, chain_id: u64) -> Self {
        match http.get_url::<TokenList>(url).await {
            Ok(list) => {
                let directory = Self::from_entries(list.tokens, chain_id);
                info!(chain_id, tokens = directory.len(), "token directory loaded");
                directory
            }
            Err(e) => {
                warn!(error = %e, "token registry unavailable, using curated tokens only");
                Self::static_only()
            }
        }
    }

    /// Look up metadata by mint address.
    pub fn resolve(&self, mint: &str) -> Option<&TokenMetadata> {
        self.tokens.get(mint)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
