pub mod amount;
pub mod client;
pub mod config;
pub mod error;
pub mod form;
pub mod holdings;
pub mod projection;
pub mod rest;
pub mod rpc;
pub mod session;
pub mod streams;
pub mod tokens;
pub mod types;
pub mod utils;
pub mod wallet;

// ---- Top-level re-exports for ergonomic usage ----

// Client + config
pub use client::{Dashboard, Flow};
pub use config::{devnet_config, Cluster, FlowConfig};
pub use error::{FlowError, Result};

// REST + RPC clients
pub use rest::FlowHttpClient;
pub use rpc::{RpcClient, TOKEN_PROGRAM_ID};

// Amounts
pub use amount::{to_base_units, to_display, BaseUnits, DEFAULT_DECIMALS};

// Token directory
pub use tokens::TokenDirectory;
pub use types::{TokenList, TokenListEntry, TokenMetadata};

// Holdings
pub use types::{ParsedTokenAccountInfo, TokenAmount, TokenHolding};

// Streams
pub use types::{
    CreateStreamResponse, SignedRequest, StreamCreationRequest, StreamDirection, StreamFlags,
    StreamRecord,
};

// Projection
pub use projection::{project, project_all, status_of, Projection, StreamRow, StreamStatus};

// Wallet + session
pub use form::CreateStreamForm;
pub use session::{SessionContext, SessionOwner};
pub use wallet::{KeypairWallet, WalletEvent, WalletProvider, WalletSession, WalletSubscription};
