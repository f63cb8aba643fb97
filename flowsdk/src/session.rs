//! Session context owned by a single [`SessionOwner`].
//!
//! Every wallet transition replaces the context wholesale and bumps a
//! generation counter. Requests run through [`SessionOwner::guard`] so that a
//! response arriving after its session was superseded is dropped.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{FlowError, Result};
use crate::tokens::TokenDirectory;
use crate::wallet::WalletEvent;

/// State tied to one connected wallet.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub address: String,
    pub directory: Arc<TokenDirectory>,
    generation: u64,
    cancel: CancellationToken,
}

impl SessionContext {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Creates, replaces, and tears down the [`SessionContext`].
#[derive(Debug)]
pub struct SessionOwner {
    directory: Arc<TokenDirectory>,
    generation: AtomicU64,
    current: Option<SessionContext>,
}

impl SessionOwner {
    pub fn new(directory: Arc<TokenDirectory>) -> Self {
        Self {
            directory,
            generation: AtomicU64::new(0),
            current: None,
        }
    }

    pub fn current(&self) -> Option<&SessionContext> {
        self.current.as_ref()
    }

    pub fn directory(&self) -> &Arc<TokenDirectory> {
        &self.directory
    }

    /// Apply a wallet event and return the resulting context, if any.
    pub fn apply(&mut self, event: &WalletEvent) -> Option<&SessionContext> {
        match event {
            WalletEvent::Connected(address) | WalletEvent::AccountChanged(address) => {
                self.replace(Some(address.clone()));
            }
            WalletEvent::Disconnected => self.replace(None),
        }
        self.current.as_ref()
    }

    fn replace(&mut self, address: Option<String>) {
        if let Some(old) = self.current.take() {
            old.cancel.cancel();
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(generation, address = ?address, "session replaced");

        self.current = address.map(|address| SessionContext {
            address,
            directory: Arc::clone(&self.directory),
            generation,
            cancel: CancellationToken::new(),
        });
    }

    /// Whether `ctx` is still the live session.
    pub fn is_current(&self, ctx: &SessionContext) -> bool {
        !ctx.cancel.is_cancelled() && self.generation.load(Ordering::SeqCst) == ctx.generation
    }

    /// Run a request tied to `ctx`.
    ///
    /// Returns `FlowError::Superseded` if the session is replaced before the
    /// request completes. The request future is dropped at that point.
    pub async fn guard<T, F>(ctx: &SessionContext, request: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        tokio::select! {
            biased;
            _ = ctx.cancel.cancelled() => {
                debug!(generation = ctx.generation, "request dropped, session superseded");
                Err(FlowError::Superseded)
            }
            result = request => {
                if ctx.cancel.is_cancelled() {
                    Err(FlowError::Superseded)
                } else {
                    result
                }
            }
        }
    }
}
