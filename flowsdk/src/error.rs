use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowError {
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("wallet provider is not available")]
    WalletUnavailable,

    #[error("wallet rejected the request: {0}")]
    WalletRejected(String),

    #[error("wallet is not connected")]
    NotConnected,

    #[error("signing error: {0}")]
    Signing(String),

    #[error("amount overflow: {0}")]
    Overflow(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("response belongs to a superseded session")]
    Superseded,
}

pub type Result<T> = std::result::Result<T, FlowError>;
