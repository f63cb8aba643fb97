//! Wallet session: a signing provider plus a typed connection-event subject.

use std::sync::{Arc, Mutex};

use ed25519_dalek::{Signer, SigningKey};
use futures_util::future::BoxFuture;
use tokio::sync::broadcast;
use tracing::{info, warn};

use crate::error::{FlowError, Result};
use crate::utils::keypair_from_private_key;

/// Connection-state change emitted by a [`WalletSession`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalletEvent {
    Connected(String),
    Disconnected,
    AccountChanged(String),
}

/// A signing provider the session can drive.
pub trait WalletProvider: Send + Sync {
    /// Request access and return the wallet address.
    ///
    /// With `only_if_trusted` the provider must not prompt; it either connects
    /// silently or fails with `FlowError::WalletRejected`.
    fn connect(&self, only_if_trusted: bool) -> BoxFuture<'_, Result<String>>;

    fn disconnect(&self) -> BoxFuture<'_, Result<()>>;

    /// Sign `message` with the connected account.
    fn sign(&self, message: &[u8]) -> BoxFuture<'_, Result<Vec<u8>>>;
}

/// Provider backed by a local ed25519 keypair.
pub struct KeypairWallet {
    key: SigningKey,
    trusted: bool,
}

impl KeypairWallet {
    pub fn new(key: SigningKey, trusted: bool) -> Self {
        Self { key, trusted }
    }

    /// Build from a bs58 secret (32-byte seed or 64-byte keypair).
    pub fn from_private_key(private_key: &str, trusted: bool) -> Result<Self> {
        Ok(Self::new(keypair_from_private_key(private_key)?, trusted))
    }

    /// Fresh random keypair.
    pub fn generate(trusted: bool) -> Self {
        Self::new(SigningKey::generate(&mut rand::rngs::OsRng), trusted)
    }

    /// bs58 public key.
    pub fn address(&self) -> String {
        bs58::encode(self.key.verifying_key().as_bytes()).into_string()
    }
}

impl WalletProvider for KeypairWallet {
    fn connect(&self, only_if_trusted: bool) -> BoxFuture<'_, Result<String>> {
        Box::pin(async move {
            if only_if_trusted && !self.trusted {
                return Err(FlowError::WalletRejected("wallet is not trusted".into()));
            }
            Ok(self.address())
        })
    }

    fn disconnect(&self) -> BoxFuture<'_, Result<()>> {
        Box::pin(async { Ok(()) })
    }

    fn sign(&self, message: &[u8]) -> BoxFuture<'_, Result<Vec<u8>>> {
        let signature = self.key.sign(message);
        Box::pin(async move { Ok(signature.to_bytes().to_vec()) })
    }
}

/// Wraps an optional provider and broadcasts connection changes.
///
/// A session without a provider is valid: it reports unavailable and every
/// connect attempt fails with `FlowError::WalletUnavailable`.
pub struct WalletSession {
    provider: Option<Arc<dyn WalletProvider>>,
    address: Mutex<Option<String>>,
    events: broadcast::Sender<WalletEvent>,
}

impl WalletSession {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            provider,
            address: Mutex::new(None),
            events,
        }
    }

    /// Session with no provider in the environment.
    pub fn unavailable() -> Self {
        Self::new(None)
    }

    pub fn is_available(&self) -> bool {
        self.provider.is_some()
    }

    pub fn address(&self) -> Option<String> {
        self.address.lock().ok().and_then(|a| a.clone())
    }

    pub fn is_connected(&self) -> bool {
        self.address().is_some()
    }

    pub fn subscribe(&self) -> WalletSubscription {
        WalletSubscription::new(self.events.subscribe())
    }

    /// Connect through the provider and emit `Connected`.
    pub async fn connect(&self, only_if_trusted: bool) -> Result<String> {
        let provider = self.provider.as_ref().ok_or(FlowError::WalletUnavailable)?;
        let address = provider.connect(only_if_trusted).await?;
        self.set_address(Some(address.clone()));
        info!(%address, "wallet connected");
        let _ = self.events.send(WalletEvent::Connected(address.clone()));
        Ok(address)
    }

    /// Disconnect and emit `Disconnected`. No-op if not connected.
    pub async fn disconnect(&self) -> Result<()> {
        let provider = self.provider.as_ref().ok_or(FlowError::WalletUnavailable)?;
        if !self.is_connected() {
            return Ok(());
        }
        provider.disconnect().await?;
        self.set_address(None);
        info!("wallet disconnected");
        let _ = self.events.send(WalletEvent::Disconnected);
        Ok(())
    }

    /// Record an account switch reported by the provider.
    pub fn switch_account(&self, address: String) -> Result<()> {
        if !self.is_connected() {
            return Err(FlowError::NotConnected);
        }
        self.set_address(Some(address.clone()));
        let _ = self.events.send(WalletEvent::AccountChanged(address));
        Ok(())
    }

    /// Sign with the connected account.
    pub async fn sign(&self, message: &[u8]) -> Result<Vec<u8>> {
        let provider = self.provider.as_ref().ok_or(FlowError::WalletUnavailable)?;
        if !self.is_connected() {
            return Err(FlowError::NotConnected);
        }
        provider.sign(message).await
    }

    fn set_address(&self, address: Option<String>) {
        match self.address.lock() {
            Ok(mut guard) => *guard = address,
            Err(poisoned) => {
                warn!("wallet address lock poisoned, recovering");
                *poisoned.into_inner() = address;
            }
        }
    }
}

/// Typed subscription for wallet events.
pub struct WalletSubscription {
    rx: broadcast::Receiver<WalletEvent>,
}

impl WalletSubscription {
    pub fn new(rx: broadcast::Receiver<WalletEvent>) -> Self {
        Self { rx }
    }

    /// Receive the next event. Returns `None` if the session is gone.
    pub async fn next(&mut self) -> Option<WalletEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("wallet subscription lagged by {n} events");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier};

    fn session(trusted: bool) -> (WalletSession, String) {
        let wallet = KeypairWallet::new(SigningKey::from_bytes(&[3u8; 32]), trusted);
        let address = wallet.address();
        (WalletSession::new(Some(Arc::new(wallet))), address)
    }

    #[tokio::test]
    async fn test_unavailable_session() {
        let session = WalletSession::unavailable();
        assert!(!session.is_available());
        assert!(matches!(
            session.connect(true).await,
            Err(FlowError::WalletUnavailable)
        ));
        assert!(matches!(
            session.sign(b"x").await,
            Err(FlowError::WalletUnavailable)
        ));
    }

    #[tokio::test]
    async fn test_connect_emits_event() {
        let (session, address) = session(true);
        let mut sub = session.subscribe();

        let connected = session.connect(true).await.unwrap();
        assert_eq!(connected, address);
        assert!(session.is_connected());
        assert_eq!(sub.next().await, Some(WalletEvent::Connected(address)));
    }

    #[tokio::test]
    async fn test_untrusted_silent_connect_rejected() {
        let (session, _) = session(false);
        assert!(matches!(
            session.connect(true).await,
            Err(FlowError::WalletRejected(_))
        ));
        assert!(!session.is_connected());

        // An explicit connect is allowed to prompt.
        session.connect(false).await.unwrap();
        assert!(session.is_connected());
    }

    #[tokio::test]
    async fn test_disconnect_and_account_change() {
        let (session, address) = session(true);
        let mut sub = session.subscribe();

        assert!(matches!(
            session.switch_account("other".into()),
            Err(FlowError::NotConnected)
        ));

        session.connect(true).await.unwrap();
        session.switch_account("other".into()).unwrap();
        assert_eq!(session.address().as_deref(), Some("other"));
        session.disconnect().await.unwrap();
        assert!(!session.is_connected());

        assert_eq!(sub.next().await, Some(WalletEvent::Connected(address)));
        assert_eq!(
            sub.next().await,
            Some(WalletEvent::AccountChanged("other".into()))
        );
        assert_eq!(sub.next().await, Some(WalletEvent::Disconnected));
    }

    #[tokio::test]
    async fn test_sign_requires_connection_and_verifies() {
        let key = SigningKey::from_bytes(&[9u8; 32]);
        let verifying = key.verifying_key();
        let session = WalletSession::new(Some(Arc::new(KeypairWallet::new(key, true))));

        assert!(matches!(
            session.sign(b"payload").await,
            Err(FlowError::NotConnected)
        ));

        session.connect(true).await.unwrap();
        let sig = session.sign(b"payload").await.unwrap();
        let sig = Signature::from_bytes(sig.as_slice().try_into().unwrap());
        verifying.verify(b"payload", &sig).unwrap();
    }

    #[test]
    fn test_generated_wallet_address_decodes() {
        let wallet = KeypairWallet::generate(true);
        let bytes = crate::utils::decode_address(&wallet.address()).unwrap();
        assert_eq!(bytes.len(), 32);
    }
}
