use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::WalletAdapter;
use crate::errors::{Result, WalletError};
use crate::models::{SignedMessage, WalletKind};

const ADDRESS_ALPHABET: &[u8] = b"0123456789abcdef";
const ADDRESS_BODY_LEN: usize = 38;

/// Timing and address shape of the simulated wallet.
#[derive(Clone, Debug)]
pub struct SimulatedWalletConfig {
    /// Bech32 prefix of fabricated addresses.
    pub address_prefix: String,
    pub connect_delay: Duration,
    pub disconnect_delay: Duration,
}

impl Default for SimulatedWalletConfig {
    fn default() -> Self {
        Self {
            address_prefix: "inj".to_string(),
            connect_delay: Duration::from_millis(1000),
            disconnect_delay: Duration::from_millis(500),
        }
    }
}

#[derive(Clone, Debug)]
struct Connection {
    kind: WalletKind,
    address: String,
}

/// Wallet that needs no extension: connecting waits a moment and then
/// hands out a random address. Signatures are deterministic digests.
pub struct SimulatedWallet {
    config: SimulatedWalletConfig,
    connection: Mutex<Option<Connection>>,
}

impl SimulatedWallet {
    pub fn new(config: SimulatedWalletConfig) -> Self {
        Self {
            config,
            connection: Mutex::new(None),
        }
    }

    fn lock_connection(&self) -> MutexGuard<'_, Option<Connection>> {
        self.connection.lock().unwrap_or_else(|poisoned| {
            warn!("Simulated wallet mutex was poisoned, recovering");
            poisoned.into_inner()
        })
    }

    fn random_address(&self) -> String {
        let mut rng = rand::thread_rng();
        let body: String = (0..ADDRESS_BODY_LEN)
            .map(|_| ADDRESS_ALPHABET[rng.gen_range(0..ADDRESS_ALPHABET.len())] as char)
            .collect();
        format!("{}1{}", self.config.address_prefix, body)
    }
}

impl Default for SimulatedWallet {
    fn default() -> Self {
        Self::new(SimulatedWalletConfig::default())
    }
}

#[async_trait]
impl WalletAdapter for SimulatedWallet {
    fn name(&self) -> &'static str {
        "simulated"
    }

    fn is_installed(&self, _kind: WalletKind) -> bool {
        true
    }

    async fn connect(&self, kind: WalletKind) -> Result<String> {
        tokio::time::sleep(self.config.connect_delay).await;

        let address = self.random_address();
        debug!("Simulated {} wallet connected as {}", kind, address);
        *self.lock_connection() = Some(Connection {
            kind,
            address: address.clone(),
        });
        Ok(address)
    }

    async fn disconnect(&self) -> Result<()> {
        if self.lock_connection().is_none() {
            return Ok(());
        }
        tokio::time::sleep(self.config.disconnect_delay).await;
        *self.lock_connection() = None;
        Ok(())
    }

    async fn sign_message(&self, message: &str) -> Result<SignedMessage> {
        let address = self
            .lock_connection()
            .as_ref()
            .map(|c| c.address.clone())
            .ok_or(WalletError::NotConnected)?;

        let signature = Sha256::digest(format!("{}:{}", address, message).as_bytes());
        let public_key = Sha256::digest(address.as_bytes());

        Ok(SignedMessage {
            signature: hex::encode(signature),
            public_key: hex::encode(public_key),
        })
    }

    fn current_wallet(&self) -> Option<WalletKind> {
        self.lock_connection().as_ref().map(|c| c.kind)
    }
}
