use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amount::{serde_base_units, BaseUnits};

use super::token::TokenMetadata;

/// `tokenAmount` of a parsed SPL token account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAmount {
    #[serde(with = "serde_base_units")]
    pub amount: BaseUnits,
    pub decimals: u32,
    pub ui_amount: Option<f64>,
    pub ui_amount_string: String,
}

/// `data.parsed.info` of a parsed SPL token account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTokenAccountInfo {
    #[serde(default)]
    pub is_native: bool,
    pub mint: String,
    pub owner: String,
    #[serde(default)]
    pub state: String,
    pub token_amount: TokenAmount,
}

/// A non-empty token balance owned by a wallet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenHolding {
    pub mint: String,
    pub owner: String,
    pub ui_amount: Decimal,
    #[serde(serialize_with = "serde_base_units::serialize")]
    pub amount: BaseUnits,
    pub decimals: u32,
    pub metadata: Option<TokenMetadata>,
}

impl TokenHolding {
    /// Symbol from the directory, empty when the mint is unknown.
    pub fn symbol(&self) -> &str {
        self.metadata.as_ref().map_or("", |m| m.symbol.as_str())
    }
}
