use serde::{Deserialize, Serialize};

use crate::amount::{serde_base_units, BaseUnits};

/// Behavioral switches shared by stream records and creation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamFlags {
    #[serde(default)]
    pub can_topup: bool,
    #[serde(default)]
    pub cancelable_by_sender: bool,
    #[serde(default)]
    pub cancelable_by_recipient: bool,
    #[serde(default)]
    pub transferable_by_sender: bool,
    #[serde(default)]
    pub transferable_by_recipient: bool,
    #[serde(default)]
    pub automatic_withdrawal: bool,
}

/// Snapshot of a stream as held by the streaming service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecord {
    pub sender: String,
    pub recipient: String,
    pub mint: String,
    #[serde(default)]
    pub name: String,
    pub start: u64,
    pub end: u64,
    #[serde(default)]
    pub cliff: u64,
    #[serde(with = "serde_base_units")]
    pub deposited_amount: BaseUnits,
    #[serde(with = "serde_base_units")]
    pub withdrawn_amount: BaseUnits,
    /// Unix seconds of cancellation, `0` while live.
    #[serde(default)]
    pub canceled_at: u64,
    #[serde(flatten)]
    pub flags: StreamFlags,
}

/// Which side of a stream a wallet is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamDirection {
    Outgoing,
    Incoming,
}

impl StreamRecord {
    pub fn is_canceled(&self) -> bool {
        self.canceled_at > 0
    }

    /// Whether `address` is the sender or the recipient.
    pub fn involves(&self, address: &str) -> bool {
        self.sender == address || self.recipient == address
    }

    /// Direction relative to `address`, `None` if it is not a party.
    pub fn direction_for(&self, address: &str) -> Option<StreamDirection> {
        if self.sender == address {
            Some(StreamDirection::Outgoing)
        } else if self.recipient == address {
            Some(StreamDirection::Incoming)
        } else {
            None
        }
    }
}

/// Parameters for a new stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamCreationRequest {
    pub sender: String,
    pub recipient: String,
    pub mint: String,
    pub start: u64,
    #[serde(with = "serde_base_units")]
    pub deposited_amount: BaseUnits,
    #[serde(with = "serde_base_units")]
    pub amount_per_period: BaseUnits,
    /// Release period in seconds.
    pub period: u64,
    pub cliff: u64,
    #[serde(with = "serde_base_units")]
    pub cliff_amount: BaseUnits,
    pub name: String,
    #[serde(flatten)]
    pub flags: StreamFlags,
}

/// Signed submission sent to the streaming service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedRequest {
    /// JSON-encoded [`StreamCreationRequest`].
    pub payload: String,
    /// bs58 ed25519 signature over `payload`.
    pub signature: String,
    /// bs58 public key of the signer.
    pub signer: String,
}

/// Streaming-service reply to a creation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStreamResponse {
    pub id: String,
    #[serde(default)]
    pub tx_id: Option<String>,
}
