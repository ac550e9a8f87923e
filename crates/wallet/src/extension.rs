//! Seam between the adapter and an injected browser wallet.
//!
//! A wallet extension injects a signer object into the page's global scope
//! under a well-known name. [`ExtensionHost`] answers "which of those objects
//! are present" and [`WalletExtension`] is the subset of the signer API the
//! adapter calls.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::chain::ChainInfo;
use crate::errors::Result;
use crate::models::{SignArbitraryResponse, WalletAccount, WalletKind};

/// The signer API an extension exposes (Keplr-compatible).
#[async_trait]
pub trait WalletExtension: Send + Sync {
    /// Ask the extension to register a chain it may not know about.
    async fn suggest_chain(&self, chain: &ChainInfo) -> Result<()>;

    /// Request the user's permission to use `chain_id`.
    async fn enable(&self, chain_id: &str) -> Result<()>;

    /// Accounts of the offline signer for `chain_id`.
    async fn get_accounts(&self, chain_id: &str) -> Result<Vec<WalletAccount>>;

    /// Sign an arbitrary UTF-8 message (ADR-036).
    async fn sign_arbitrary(
        &self,
        chain_id: &str,
        signer: &str,
        data: &str,
    ) -> Result<SignArbitraryResponse>;
}

/// Lookup of injected extension objects. Never fails.
pub trait ExtensionHost: Send + Sync {
    fn extension(&self, kind: WalletKind) -> Option<Arc<dyn WalletExtension>>;
}

/// Host backed by an explicit table of injected extensions.
///
/// Used when the embedding runtime registers extensions as it discovers
/// them, and by tests.
#[derive(Default)]
pub struct InjectedExtensions {
    installed: RwLock<HashMap<WalletKind, Arc<dyn WalletExtension>>>,
}

impl InjectedExtensions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the extension for `kind`.
    pub fn inject(&self, kind: WalletKind, extension: Arc<dyn WalletExtension>) {
        if let Ok(mut installed) = self.installed.write() {
            installed.insert(kind, extension);
        }
    }

    /// Forget the extension for `kind`, as if it was uninstalled.
    pub fn remove(&self, kind: WalletKind) {
        if let Ok(mut installed) = self.installed.write() {
            installed.remove(&kind);
        }
    }
}

impl ExtensionHost for InjectedExtensions {
    fn extension(&self, kind: WalletKind) -> Option<Arc<dyn WalletExtension>> {
        self.installed
            .read()
            .ok()
            .and_then(|installed| installed.get(&kind).cloned())
    }
}
