//! Stream repository (read) and creator (write).

use tracing::{debug, info};

use crate::error::{FlowError, Result};
use crate::rest::FlowHttpClient;
use crate::types::{CreateStreamResponse, SignedRequest, StreamCreationRequest, StreamRecord};
use crate::utils::decode_address;
use crate::wallet::WalletSession;

impl StreamCreationRequest {
    /// Reject requests the streaming service would refuse.
    pub fn validate(&self) -> Result<()> {
        decode_address(&self.sender)?;
        decode_address(&self.recipient)?;
        decode_address(&self.mint)?;
        if self.deposited_amount == 0 {
            return Err(FlowError::Validation("deposit amount must be positive".into()));
        }
        if self.period == 0 {
            return Err(FlowError::Validation("period must be at least one second".into()));
        }
        if self.cliff < self.start {
            return Err(FlowError::Validation("cliff must not precede start".into()));
        }
        if self.cliff_amount > self.deposited_amount {
            return Err(FlowError::Validation("cliff amount exceeds deposit".into()));
        }
        Ok(())
    }
}

/// All streams where `address` is sender or recipient.
pub async fn list_streams(
    http: &FlowHttpClient,
    address: &str,
) -> Result<Vec<(String, StreamRecord)>> {
    let streams = http.get_streams(address).await?;
    debug!(%address, count = streams.len(), "streams fetched");
    Ok(streams)
}

/// Encode a request and sign it with the connected wallet.
pub async fn sign_request(
    wallet: &WalletSession,
    request: &StreamCreationRequest,
) -> Result<SignedRequest> {
    let signer = wallet.address().ok_or(FlowError::NotConnected)?;
    if signer != request.sender {
        return Err(FlowError::Validation(format!(
            "request sender {} is not the connected wallet {signer}",
            request.sender
        )));
    }

    let payload = serde_json::to_string(request)?;
    let signature = wallet.sign(payload.as_bytes()).await?;

    Ok(SignedRequest {
        payload,
        signature: bs58::encode(signature).into_string(),
        signer,
    })
}

/// Validate, sign, and submit a creation request. Returns the new stream id.
pub async fn create_stream(
    http: &FlowHttpClient,
    wallet: &WalletSession,
    request: &StreamCreationRequest,
) -> Result<CreateStreamResponse> {
    request.validate()?;
    let signed = sign_request(wallet, request).await?;
    let response = http.post_stream(&signed).await?;
    info!(id = %response.id, name = %request.name, "stream created");
    Ok(response)
}
