//! Error types for wallet operations.

use thiserror::Error;

/// Errors raised by wallet adapters and the wallet session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WalletError {
    /// The requested browser extension is not present.
    #[error("{wallet} wallet not found. Please install it first.")]
    NotInstalled {
        /// Display name of the wallet (e.g. "Keplr")
        wallet: String,
    },

    /// The wallet id is not one we support.
    #[error("Unsupported wallet: {0}")]
    UnsupportedWallet(String),

    /// The extension granted access but exposed no account.
    #[error("No accounts found")]
    NoAccounts,

    /// An operation that needs a connection was called while disconnected.
    #[error("No wallet connected")]
    NotConnected,

    /// The extension returned a signature without the required fields.
    #[error("Invalid signature response")]
    InvalidSignature,

    /// The extension rejected or failed a request.
    #[error("Wallet extension error: {0}")]
    Extension(String),
}

pub type Result<T> = std::result::Result<T, WalletError>;
