use chrono::{TimeZone, Utc};

use crate::error::{FlowError, Result};

/// Decode a bs58 account address into its 32 raw bytes.
///
/// # Errors
///
/// Returns `FlowError::InvalidAddress` if the string is not bs58 or does not
/// decode to exactly 32 bytes.
pub fn decode_address(address: &str) -> Result<[u8; 32]> {
    let bytes = bs58::decode(address)
        .into_vec()
        .map_err(|e| FlowError::InvalidAddress(format!("{address}: {e}")))?;
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| FlowError::InvalidAddress(format!("{address}: expected 32 bytes, got {len}")))
}

/// Parse a private key from a bs58 string.
pub fn keypair_from_private_key(key: &str) -> Result<ed25519_dalek::SigningKey> {
    let bytes = bs58::decode(key.trim())
        .into_vec()
        .map_err(|e| FlowError::Signing(format!("bs58 decode error: {e}")))?;

    // Accept either a 32-byte secret or a 64-byte keypair (first 32 bytes are the secret).
    let secret_bytes: [u8; 32] = if bytes.len() == 64 {
        bytes[..32]
            .try_into()
            .map_err(|_| FlowError::Signing("invalid key length".into()))?
    } else if bytes.len() == 32 {
        bytes
            .try_into()
            .map_err(|_| FlowError::Signing("invalid key length".into()))?
    } else {
        return Err(FlowError::Signing(format!(
            "unexpected key length: {}",
            bytes.len()
        )));
    };

    Ok(ed25519_dalek::SigningKey::from_bytes(&secret_bytes))
}

/// Current wall-clock time in unix seconds.
pub fn now_in_seconds() -> u64 {
    Utc::now().timestamp().max(0) as u64
}

/// Render unix seconds as an RFC 2822-style UTC string.
pub fn format_utc(seconds: u64) -> String {
    i64::try_from(seconds)
        .ok()
        .and_then(|s| Utc.timestamp_opt(s, 0).single())
        .map(|dt| dt.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
        .unwrap_or_default()
}
