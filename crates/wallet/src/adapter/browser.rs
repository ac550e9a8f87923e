use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::{debug, error, info, warn};

use super::WalletAdapter;
use crate::chain::ChainInfo;
use crate::errors::{Result, WalletError};
use crate::extension::{ExtensionHost, WalletExtension};
use crate::models::{SignedMessage, WalletKind};

/// Adapter over a real injected wallet extension.
pub struct BrowserExtensionWallet {
    host: Arc<dyn ExtensionHost>,
    chain: ChainInfo,
    current: Mutex<Option<WalletKind>>,
}

impl BrowserExtensionWallet {
    pub fn new(host: Arc<dyn ExtensionHost>, chain: ChainInfo) -> Self {
        Self {
            host,
            chain,
            current: Mutex::new(None),
        }
    }

    /// Lock the current-wallet slot, recovering from poison if necessary.
    fn lock_current(&self) -> MutexGuard<'_, Option<WalletKind>> {
        self.current.lock().unwrap_or_else(|poisoned| {
            warn!("Wallet state mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// First account address of the signer for our chain.
    async fn first_address(&self, extension: &dyn WalletExtension) -> Result<String> {
        extension
            .get_accounts(&self.chain.chain_id)
            .await?
            .into_iter()
            .next()
            .map(|account| account.address)
            .ok_or(WalletError::NoAccounts)
    }

    async fn handshake(&self, kind: WalletKind) -> Result<String> {
        let extension = self
            .host
            .extension(kind)
            .ok_or_else(|| WalletError::NotInstalled {
                wallet: kind.display_name().to_string(),
            })?;

        extension.suggest_chain(&self.chain).await?;
        extension.enable(&self.chain.chain_id).await?;

        self.first_address(extension.as_ref()).await
    }

    async fn sign(&self, message: &str) -> Result<SignedMessage> {
        let kind = self.current_wallet().ok_or(WalletError::NotConnected)?;
        let extension = self
            .host
            .extension(kind)
            .ok_or_else(|| WalletError::Extension("Wallet not found".to_string()))?;

        let address = self.first_address(extension.as_ref()).await?;
        debug!("Requesting {} signature for {}", kind, address);

        let response = extension
            .sign_arbitrary(&self.chain.chain_id, &address, message)
            .await?;

        SignedMessage::try_from(response)
    }
}

#[async_trait]
impl WalletAdapter for BrowserExtensionWallet {
    fn name(&self) -> &'static str {
        "extension"
    }

    fn is_installed(&self, kind: WalletKind) -> bool {
        self.host.extension(kind).is_some()
    }

    async fn connect(&self, kind: WalletKind) -> Result<String> {
        *self.lock_current() = None;
        match self.handshake(kind).await {
            Ok(address) => {
                *self.lock_current() = Some(kind);
                info!("Connected {} wallet on {}", kind, self.chain.chain_id);
                Ok(address)
            }
            Err(e) => {
                error!("Error connecting wallet: {}", e);
                Err(e)
            }
        }
    }

    async fn disconnect(&self) -> Result<()> {
        *self.lock_current() = None;
        Ok(())
    }

    async fn sign_message(&self, message: &str) -> Result<SignedMessage> {
        self.sign(message)
            .await
            .inspect_err(|e| error!("Error signing message: {}", e))
    }

    fn current_wallet(&self) -> Option<WalletKind> {
        *self.lock_current()
    }
}
