//! Create-stream form: user inputs -> [`StreamCreationRequest`].

use rust_decimal::Decimal;

use crate::amount::{to_base_units, DEFAULT_DECIMALS};
use crate::error::{FlowError, Result};
use crate::types::{StreamCreationRequest, StreamFlags, TokenHolding, TokenMetadata};

/// Delay between submission and stream start, in seconds.
pub const START_DELAY_SECS: u64 = 60;
/// Delay between submission and cliff, in seconds.
pub const CLIFF_DELAY_SECS: u64 = 120;

/// Flags every stream created from the form carries.
pub const FORM_FLAGS: StreamFlags = StreamFlags {
    can_topup: true,
    cancelable_by_sender: true,
    cancelable_by_recipient: false,
    transferable_by_sender: true,
    transferable_by_recipient: false,
    automatic_withdrawal: true,
};

#[derive(Debug, Clone, PartialEq)]
pub struct CreateStreamForm {
    pub recipient: String,
    pub name: String,
    /// Mint of the token to stream.
    pub token_address: String,
    /// Release period in seconds.
    pub period: u64,
    /// Deposit in display units.
    pub amount: Decimal,
}

impl Default for CreateStreamForm {
    fn default() -> Self {
        Self {
            recipient: String::new(),
            name: String::new(),
            token_address: String::new(),
            period: 1,
            amount: Decimal::TEN,
        }
    }
}

impl CreateStreamForm {
    /// Form preselecting the first holding, or an error when there is nothing
    /// to stream.
    pub fn for_holdings(holdings: &[TokenHolding]) -> Result<Self> {
        let first = holdings.first().ok_or_else(|| {
            FlowError::Validation(
                "You must have currency in your wallet to create a stream".into(),
            )
        })?;
        Ok(Self {
            token_address: first.mint.clone(),
            ..Default::default()
        })
    }

    /// Build the request the streaming service expects.
    ///
    /// Decimals come from the token's directory `metadata`, then the wallet's
    /// on-chain `holding_decimals`, then [`DEFAULT_DECIMALS`].
    pub fn build_request(
        &self,
        sender: &str,
        now: u64,
        metadata: Option<&TokenMetadata>,
        holding_decimals: Option<u32>,
    ) -> Result<StreamCreationRequest> {
        if self.token_address.is_empty() {
            return Err(FlowError::Validation("no token selected".into()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(FlowError::Validation("amount must be positive".into()));
        }

        let decimals = metadata
            .map(|m| m.decimals)
            .or(holding_decimals)
            .unwrap_or(DEFAULT_DECIMALS);
        let one_token = to_base_units(Decimal::ONE, decimals)?;

        Ok(StreamCreationRequest {
            sender: sender.into(),
            recipient: self.recipient.trim().into(),
            mint: self.token_address.clone(),
            start: now + START_DELAY_SECS,
            deposited_amount: to_base_units(self.amount, decimals)?,
            amount_per_period: one_token,
            period: self.period,
            cliff: now + CLIFF_DELAY_SECS,
            cliff_amount: one_token,
            name: self.name.clone(),
            flags: FORM_FLAGS,
        })
    }
}
