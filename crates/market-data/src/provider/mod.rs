//! Upstream provider abstraction and implementations.
//!
//! This module contains:
//! - The `UpstreamProvider` trait the market data service is written against
//! - The CoinGecko implementation used in production
//!
//! Tests substitute their own `UpstreamProvider` to count and script calls.

mod traits;

pub mod coingecko;

// Re-exports
pub use traits::UpstreamProvider;
