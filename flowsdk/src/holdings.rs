use rust_decimal::Decimal;
use tracing::debug;

use crate::error::Result;
use crate::rpc::{RpcClient, TOKEN_PROGRAM_ID};
use crate::tokens::TokenDirectory;
use crate::types::{ParsedTokenAccountInfo, TokenHolding};

/// Keep accounts with a positive balance and attach directory metadata.
pub fn to_holdings(
    accounts: Vec<ParsedTokenAccountInfo>,
    directory: &TokenDirectory,
) -> Vec<TokenHolding> {
    accounts
        .into_iter()
        .filter_map(|info| {
            let ui_amount = info
                .token_amount
                .ui_amount_string
                .parse::<Decimal>()
                .ok()
                .or_else(|| info.token_amount.ui_amount.and_then(|v| Decimal::try_from(v).ok()))?;
            if ui_amount <= Decimal::ZERO {
                return None;
            }
            let metadata = directory.resolve(&info.mint).cloned();
            Some(TokenHolding {
                mint: info.mint,
                owner: info.owner,
                ui_amount,
                amount: info.token_amount.amount,
                decimals: info.token_amount.decimals,
                metadata,
            })
        })
        .collect()
}

/// Fetch the wallet's non-empty token balances.
pub async fn list_holdings(
    rpc: &RpcClient,
    directory: &TokenDirectory,
    address: &str,
    commitment: &str,
) -> Result<Vec<TokenHolding>> {
    let accounts = rpc
        .get_parsed_token_accounts_by_owner(address, TOKEN_PROGRAM_ID, commitment)
        .await?;
    let total = accounts.len();
    let holdings = to_holdings(accounts, directory);
    debug!(%address, total, non_zero = holdings.len(), "holdings fetched");
    Ok(holdings)
}

/// Mint preselected in the create form: the first holding.
pub fn default_token(holdings: &[TokenHolding]) -> Option<&str> {
    holdings.first().map(|h| h.mint.as_str())
}
