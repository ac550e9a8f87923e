//! Application-wide wallet session.
//!
//! [`WalletSession`] owns the connection state machine
//! (`Disconnected -> Connecting -> Connected`) and publishes every change
//! through a `watch` channel so any number of views can observe it.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapter::WalletAdapter;
use crate::errors::{Result, WalletError};
use crate::models::{SignedMessage, WalletKind};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
}

/// Observable snapshot of the session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub address: Option<String>,
    pub state: ConnectionState,
    pub wallet: Option<WalletKind>,
    pub last_error: Option<String>,
}

impl SessionView {
    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn is_connecting(&self) -> bool {
        self.state == ConnectionState::Connecting
    }
}

pub struct WalletSession {
    adapter: Arc<dyn WalletAdapter>,
    state: watch::Sender<SessionView>,
}

impl WalletSession {
    pub fn new(adapter: Arc<dyn WalletAdapter>) -> Self {
        let (state, _) = watch::channel(SessionView::default());
        Self { adapter, state }
    }

    /// Current state.
    pub fn state(&self) -> SessionView {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.state.subscribe()
    }

    pub fn adapter(&self) -> &Arc<dyn WalletAdapter> {
        &self.adapter
    }

    /// Connect `kind`. The session always leaves `Connecting`: it ends in
    /// `Connected` with the address, or in `Disconnected` with `last_error` set.
    pub async fn connect(&self, kind: WalletKind) -> Result<String> {
        self.state.send_modify(|view| {
            view.state = ConnectionState::Connecting;
            view.address = None;
            view.wallet = None;
            view.last_error = None;
        });

        match self.adapter.connect(kind).await {
            Ok(address) => {
                info!("Wallet session connected ({})", kind);
                self.state.send_modify(|view| {
                    view.state = ConnectionState::Connected;
                    view.address = Some(address.clone());
                    view.wallet = Some(kind);
                });
                Ok(address)
            }
            Err(e) => {
                warn!("Wallet session failed to connect: {}", e);
                self.state.send_modify(|view| {
                    view.state = ConnectionState::Disconnected;
                    view.last_error = Some(e.to_string());
                });
                Err(e)
            }
        }
    }

    /// Disconnect. Safe to call in any state.
    pub async fn disconnect(&self) -> Result<()> {
        let result = self.adapter.disconnect().await;
        self.state.send_modify(|view| {
            view.state = ConnectionState::Disconnected;
            view.address = None;
            view.wallet = None;
        });
        result
    }

    pub async fn sign_message(&self, message: &str) -> Result<SignedMessage> {
        if !self.state.borrow().is_connected() {
            return Err(WalletError::NotConnected);
        }
        self.adapter.sign_message(message).await
    }
}
