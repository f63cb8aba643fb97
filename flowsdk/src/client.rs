use std::sync::Arc;

use tracing::info;

use crate::config::FlowConfig;
use crate::error::{FlowError, Result};
use crate::holdings;
use crate::projection::{project_all, StreamRow};
use crate::rest::FlowHttpClient;
use crate::rpc::RpcClient;
use crate::session::{SessionContext, SessionOwner};
use crate::streams;
use crate::tokens::TokenDirectory;
use crate::types::*;
use crate::wallet::WalletSession;

/// Holdings and streams for one session, fetched together.
#[derive(Debug)]
pub struct Dashboard {
    pub holdings: Result<Vec<TokenHolding>>,
    pub streams: Result<Vec<StreamRow>>,
}

/// Main client for the streaming service and its chain.
#[derive(Debug, Clone)]
pub struct Flow {
    pub config: FlowConfig,
    /// Streaming-service client.
    pub stream_api: FlowHttpClient,
    /// Chain JSON-RPC client.
    pub rpc: RpcClient,
    /// Token metadata for the configured cluster.
    pub directory: Arc<TokenDirectory>,
}

impl Flow {
    /// Create a client and load the token directory.
    pub async fn new(config: FlowConfig) -> Result<Self> {
        config.validate()?;
        let client = reqwest::Client::new();
        let registry = FlowHttpClient::with_client(client.clone(), &config.token_list_url);
        let directory =
            TokenDirectory::load(&registry, &config.token_list_url, config.cluster.chain_id())
                .await;
        Ok(Self::with_directory(config, client, directory))
    }

    /// Create a client around an already-built directory.
    pub fn with_directory(
        config: FlowConfig,
        client: reqwest::Client,
        directory: TokenDirectory,
    ) -> Self {
        let stream_api = FlowHttpClient::with_client(client.clone(), &config.stream_api_url);
        let rpc = RpcClient::new(FlowHttpClient::with_client(client, &config.rpc_url));
        info!(cluster = %config.cluster, tokens = directory.len(), "client ready");
        Self {
            config,
            stream_api,
            rpc,
            directory: Arc::new(directory),
        }
    }

    /// Fresh session owner sharing this client's directory.
    pub fn session_owner(&self) -> SessionOwner {
        SessionOwner::new(Arc::clone(&self.directory))
    }

    /// Non-empty token balances of `address`.
    pub async fn list_holdings(&self, address: &str) -> Result<Vec<TokenHolding>> {
        holdings::list_holdings(&self.rpc, &self.directory, address, &self.config.commitment).await
    }

    /// Streams where `address` is sender or recipient, unsorted.
    pub async fn list_streams(&self, address: &str) -> Result<Vec<(String, StreamRecord)>> {
        streams::list_streams(&self.stream_api, address).await
    }

    /// Streams of `address` projected at `now`, most recent first.
    pub async fn stream_rows(&self, address: &str, now: u64) -> Result<Vec<StreamRow>> {
        let streams = self.list_streams(address).await?;
        Ok(project_all(streams, now, &self.directory))
    }

    /// Sign with the session wallet and submit.
    pub async fn create_stream(
        &self,
        wallet: &WalletSession,
        request: &StreamCreationRequest,
    ) -> Result<CreateStreamResponse> {
        streams::create_stream(&self.stream_api, wallet, request).await
    }

    /// Fetch holdings and streams for `ctx` concurrently.
    ///
    /// Each half fails independently; a superseded session yields
    /// `FlowError::Superseded` in both.
    pub async fn load_dashboard(&self, ctx: &SessionContext, now: u64) -> Dashboard {
        let holdings_fut = SessionOwner::guard(
            ctx,
            holdings::list_holdings(
                &self.rpc,
                &ctx.directory,
                &ctx.address,
                &self.config.commitment,
            ),
        );
        let streams_fut = SessionOwner::guard(ctx, async {
            let streams = streams::list_streams(&self.stream_api, &ctx.address).await?;
            Ok::<_, FlowError>(project_all(streams, now, &ctx.directory))
        });

        let (holdings, streams) = tokio::join!(holdings_fut, streams_fut);
        Dashboard { holdings, streams }
    }
}
