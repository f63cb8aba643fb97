use serde::{Deserialize, Serialize};

/// One entry of the token registry document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenListEntry {
    pub chain_id: u64,
    pub address: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u32,
    #[serde(rename = "logoURI", default)]
    pub logo_uri: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Token registry document: `{"name": ..., "tokens": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenList {
    #[serde(default)]
    pub name: String,
    pub tokens: Vec<TokenListEntry>,
}

/// Display metadata for a mint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenMetadata {
    pub address: String,
    pub symbol: String,
    pub name: String,
    #[serde(rename = "logoURI")]
    pub logo_uri: String,
    pub decimals: u32,
    pub chain_id: u64,
}

impl From<TokenListEntry> for TokenMetadata {
    fn from(entry: TokenListEntry) -> Self {
        Self {
            address: entry.address,
            symbol: entry.symbol,
            name: entry.name,
            logo_uri: entry.logo_uri,
            decimals: entry.decimals,
            chain_id: entry.chain_id,
        }
    }
}
