//! Orchestrates the SDK the way the single-page client did: load the token
//! directory and restore the wallet concurrently, then drive reads and writes
//! for the connected address.

use std::future::Future;
use std::io::{self, Write};
use std::sync::Arc;

use flowsdk::session::{SessionContext, SessionOwner};
use flowsdk::utils::now_in_seconds;
use flowsdk::{
    CreateStreamForm, Flow, FlowConfig, FlowError, KeypairWallet, WalletEvent, WalletSession,
};
use tokio::time::{self, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::cli::{CreateArgs, ViewArgs, WatchArgs};
use crate::error::AppError;
use crate::output;

/// Client, wallet, and the single owner of the session context.
pub struct App {
    flow: Flow,
    wallet: WalletSession,
    owner: SessionOwner,
}

impl App {
    /// Load the token directory and silently restore a trusted wallet.
    ///
    /// A missing `private_key` leaves the wallet unavailable; reads still work
    /// with an explicit address.
    pub async fn start(config: FlowConfig, private_key: Option<String>) -> Result<Self, AppError> {
        let wallet = match private_key {
            Some(key) => {
                let provider = KeypairWallet::from_private_key(&key, true)?;
                WalletSession::new(Some(Arc::new(provider)))
            }
            None => {
                warn!("PRIVATE_KEY not set, wallet is not available");
                WalletSession::unavailable()
            }
        };

        let (flow, restored) = tokio::join!(Flow::new(config), wallet.connect(true));
        let flow = flow?;

        let mut owner = flow.session_owner();
        match restored {
            Ok(address) => {
                owner.apply(&WalletEvent::Connected(address));
            }
            Err(FlowError::WalletUnavailable) => {}
            Err(e) => warn!(error = %e, "wallet not restored"),
        }

        Ok(Self {
            flow,
            wallet,
            owner,
        })
    }

    /// Session for `address` if given, else the connected wallet's session.
    fn view_session(&mut self, address: Option<&str>) -> Option<SessionContext> {
        match address {
            Some(address) => self
                .owner
                .apply(&WalletEvent::Connected(address.to_string()))
                .cloned(),
            None => self.owner.current().cloned(),
        }
    }

    pub async fn holdings(&mut self, args: &ViewArgs) -> Result<(), AppError> {
        let mut stdout = io::stdout();
        let Some(ctx) = self.view_session(args.address.as_deref()) else {
            writeln!(stdout, "{}", output::NO_WALLET)?;
            return Ok(());
        };

        let result = SessionOwner::guard(&ctx, self.flow.list_holdings(&ctx.address)).await;
        match result {
            Ok(holdings) => output::render_holdings(&holdings, args.json, &mut stdout),
            Err(e) => {
                error!(error = %e, "failed to load holdings");
                writeln!(stdout, "{}", output::LOAD_FAILED)?;
                Err(e.into())
            }
        }
    }

    pub async fn streams(&mut self, args: &ViewArgs) -> Result<(), AppError> {
        let mut stdout = io::stdout();
        let Some(ctx) = self.view_session(args.address.as_deref()) else {
            writeln!(stdout, "{}", output::NO_WALLET)?;
            return Ok(());
        };
        self.render_streams(&ctx, args.json, &mut stdout).await
    }

    async fn render_streams<W: Write>(
        &self,
        ctx: &SessionContext,
        json_mode: bool,
        writer: &mut W,
    ) -> Result<(), AppError> {
        let now = now_in_seconds();
        let result = SessionOwner::guard(ctx, self.flow.stream_rows(&ctx.address, now)).await;
        match result {
            Ok(rows) => output::render_streams(&rows, json_mode, writer),
            Err(e) => {
                error!(error = %e, "failed to load streams");
                writeln!(writer, "{}", output::LOAD_FAILED)?;
                Err(e.into())
            }
        }
    }

    /// Submit the create form, then show the refreshed stream list.
    pub async fn create(&mut self, args: &CreateArgs) -> Result<(), AppError> {
        let mut stdout = io::stdout();
        let ctx = match create_session(&self.wallet, &self.owner) {
            Ok(ctx) => ctx,
            Err(message) => {
                writeln!(stdout, "{message}")?;
                return Ok(());
            }
        };

        let holdings = SessionOwner::guard(&ctx, self.flow.list_holdings(&ctx.address)).await?;
        let Ok(mut form) = CreateStreamForm::for_holdings(&holdings) else {
            writeln!(stdout, "{}", output::NO_CURRENCY)?;
            return Ok(());
        };
        form.recipient = args.recipient.clone();
        form.name = args.name.clone();
        form.amount = args.amount;
        form.period = args.period;
        if let Some(token) = &args.token {
            form.token_address = token.clone();
        }

        let metadata = self.flow.directory.resolve(&form.token_address);
        let holding_decimals = holdings
            .iter()
            .find(|h| h.mint == form.token_address)
            .map(|h| h.decimals);
        let request =
            form.build_request(&ctx.address, now_in_seconds(), metadata, holding_decimals)?;
        debug!(?request, "submitting stream");

        match self.flow.create_stream(&self.wallet, &request).await {
            Ok(resp) => {
                writeln!(stdout, "Stream created successfully! id: {}", resp.id)?;
            }
            Err(e) => {
                error!(error = %e, "stream creation failed");
                writeln!(stdout, "{e}")?;
                return Err(e.into());
            }
        }

        self.render_streams(&ctx, args.json, &mut stdout).await
    }

    /// Re-render streams every `interval` seconds until cancelled or the
    /// wallet disconnects.
    pub async fn watch(&mut self, args: &WatchArgs, cancel: CancellationToken) -> Result<(), AppError> {
        let mut events = self.wallet.subscribe();
        let Some(mut ctx) = self.view_session(args.view.address.as_deref()) else {
            writeln!(io::stdout(), "{}", output::NO_WALLET)?;
            return Ok(());
        };

        let mut interval = time::interval(Duration::from_secs(args.interval.max(1)));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let mut stdout = io::stdout();
                    let render = self.render_streams(&ctx, args.view.json, &mut stdout);
                    match until_cancelled(&cancel, render).await {
                        None => return self.stop_watch().await,
                        Some(Ok(())) | Some(Err(AppError::Flow(FlowError::Superseded))) => {}
                        // Reads are not retried; the next tick is a fresh attempt.
                        Some(Err(e)) => debug!(error = %e, "refresh failed"),
                    }
                }
                Some(event) = events.next() => {
                    match self.owner.apply(&event) {
                        Some(next) => {
                            info!(address = %next.address, "session changed");
                            ctx = next.clone();
                        }
                        None => {
                            info!("wallet disconnected, stopping watch");
                            return Ok(());
                        }
                    }
                }
                _ = cancel.cancelled() => return self.stop_watch().await,
            }
        }
    }

    async fn stop_watch(&self) -> Result<(), AppError> {
        info!("watch stopped");
        if self.wallet.is_connected() {
            self.wallet.disconnect().await?;
        }
        Ok(())
    }
}

/// Session a create runs under, or the message shown instead.
///
/// A missing or disconnected wallet is not a failure: the form is simply
/// unavailable.
fn create_session(
    wallet: &WalletSession,
    owner: &SessionOwner,
) -> Result<SessionContext, &'static str> {
    if !wallet.is_available() {
        return Err(output::WALLET_UNAVAILABLE);
    }
    owner.current().cloned().ok_or(output::NO_WALLET)
}

/// Run `fut` unless `cancel` fires first.
async fn until_cancelled<F: Future>(cancel: &CancellationToken, fut: F) -> Option<F::Output> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => None,
        out = fut => Some(out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flowsdk::TokenDirectory;

    fn owner() -> SessionOwner {
        SessionOwner::new(Arc::new(TokenDirectory::static_only()))
    }

    #[test]
    fn test_create_without_wallet_provider() {
        let wallet = WalletSession::unavailable();
        let message = create_session(&wallet, &owner()).unwrap_err();
        assert_eq!(message, output::WALLET_UNAVAILABLE);
    }

    #[test]
    fn test_create_with_disconnected_wallet() {
        let wallet = WalletSession::new(Some(Arc::new(KeypairWallet::generate(true))));
        assert_eq!(create_session(&wallet, &owner()).unwrap_err(), output::NO_WALLET);
    }

    #[tokio::test]
    async fn test_create_with_connected_wallet() {
        let wallet = WalletSession::new(Some(Arc::new(KeypairWallet::generate(true))));
        let address = wallet.connect(true).await.unwrap();
        let mut owner = owner();
        owner.apply(&WalletEvent::Connected(address.clone()));

        let ctx = create_session(&wallet, &owner).unwrap();
        assert_eq!(ctx.address, address);
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_refresh() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let out = until_cancelled(&cancel, std::future::pending::<()>()).await;
        assert!(out.is_none());

        let live = CancellationToken::new();
        assert_eq!(until_cancelled(&live, async { 7 }).await, Some(7));
    }
}
