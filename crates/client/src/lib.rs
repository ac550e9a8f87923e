//! HTTP clients used by the Memedex front end.
//!
//! - [`TradingApiClient`] talks to the external trading backend and maps its
//!   snake_case responses into camelCase view models.
//! - [`ProxyClient`] talks to the market proxy served by `memedex-server`.
//!
//! Both log failures and return them to the caller unchanged.

pub mod config;
pub mod errors;
mod http;
pub mod proxy;
pub mod trading;

pub use config::ClientConfig;
pub use errors::{ClientError, Result};
pub use proxy::ProxyClient;
pub use trading::TradingApiClient;
