//! Wallet adapters.
//!
//! [`WalletAdapter`] is the single capability the rest of the application
//! talks to. Two variants exist:
//! - [`BrowserExtensionWallet`]: drives a real injected extension (Keplr, Leap)
//! - [`SimulatedWallet`]: fabricates an address after a delay, for demos and tests
//!
//! The variant is chosen once from configuration via [`WalletMode`].

mod browser;
mod simulated;

use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;

use crate::chain::ChainInfo;
use crate::errors::Result;
use crate::extension::ExtensionHost;
use crate::models::{SignedMessage, WalletKind};

pub use browser::BrowserExtensionWallet;
pub use simulated::{SimulatedWallet, SimulatedWalletConfig};

/// Connect/disconnect/sign capability shared by every wallet variant.
#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// Variant name for logs ("extension", "simulated").
    fn name(&self) -> &'static str;

    /// Whether the wallet `kind` can be used right now. Never fails.
    fn is_installed(&self, kind: WalletKind) -> bool;

    /// Connect to `kind` and return the first account's address.
    async fn connect(&self, kind: WalletKind) -> Result<String>;

    /// Drop the connection. Calling it while disconnected is a no-op.
    async fn disconnect(&self) -> Result<()>;

    /// Sign `message` with the connected account.
    async fn sign_message(&self, message: &str) -> Result<SignedMessage>;

    /// Wallet currently connected, if any.
    fn current_wallet(&self) -> Option<WalletKind>;
}

/// Which adapter variant to build.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum WalletMode {
    #[default]
    Extension,
    Simulated,
}

impl FromStr for WalletMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "extension" | "browser" => Ok(Self::Extension),
            "simulated" | "mock" => Ok(Self::Simulated),
            other => Err(format!("Unknown wallet mode: {}", other)),
        }
    }
}

/// Build the adapter selected by `mode`.
///
/// `host` is only consulted by the extension variant.
pub fn build_adapter(
    mode: WalletMode,
    host: Arc<dyn ExtensionHost>,
    chain: ChainInfo,
) -> Arc<dyn WalletAdapter> {
    match mode {
        WalletMode::Extension => Arc::new(BrowserExtensionWallet::new(host, chain)),
        WalletMode::Simulated => Arc::new(SimulatedWallet::new(SimulatedWalletConfig {
            address_prefix: chain.address_prefix().to_string(),
            ..Default::default()
        })),
    }
}
