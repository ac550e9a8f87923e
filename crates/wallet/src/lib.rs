//! Wallet connection for the memedex front end.
//!
//! Provides:
//! - [`ChainInfo`] for the Injective testnet, suggested to extensions on connect
//! - [`WalletAdapter`] with a browser-extension and a simulated variant
//! - [`WalletSession`], the observable connection state machine

pub mod adapter;
pub mod chain;
pub mod errors;
pub mod extension;
pub mod models;
pub mod session;

pub use adapter::{
    build_adapter, BrowserExtensionWallet, SimulatedWallet, SimulatedWalletConfig, WalletAdapter,
    WalletMode,
};
pub use chain::ChainInfo;
pub use errors::{Result, WalletError};
pub use extension::{ExtensionHost, InjectedExtensions, WalletExtension};
pub use models::{
    SignArbitraryResponse, SignedMessage, WalletAccount, WalletInfo, WalletKind, SUPPORTED_WALLETS,
};
pub use session::{ConnectionState, SessionView, WalletSession};
