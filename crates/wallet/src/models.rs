//! Wallet identity and signing models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::WalletError;

/// Browser wallet extensions we know how to drive.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WalletKind {
    Keplr,
    Leap,
}

impl WalletKind {
    /// Short human name used in messages ("Keplr", "Leap").
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Keplr => "Keplr",
            Self::Leap => "Leap",
        }
    }

    /// Name of the object the extension injects into the page scope.
    pub fn global_name(&self) -> &'static str {
        match self {
            Self::Keplr => "keplr",
            Self::Leap => "leap",
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.global_name())
    }
}

impl FromStr for WalletKind {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keplr" => Ok(Self::Keplr),
            "leap" => Ok(Self::Leap),
            other => Err(WalletError::UnsupportedWallet(other.to_string())),
        }
    }
}

/// Catalogue entry shown in the wallet picker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WalletInfo {
    pub name: &'static str,
    pub icon: &'static str,
    pub id: WalletKind,
}

/// Wallets offered to the user, in display order.
pub const SUPPORTED_WALLETS: &[WalletInfo] = &[
    WalletInfo {
        name: "Keplr Wallet",
        icon: "/wallets/keplr.svg",
        id: WalletKind::Keplr,
    },
    WalletInfo {
        name: "Leap Wallet",
        icon: "/wallets/leap.svg",
        id: WalletKind::Leap,
    },
];

/// An account exposed by a wallet's offline signer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletAccount {
    pub address: String,
    #[serde(default)]
    pub algo: Option<String>,
}

impl WalletAccount {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            algo: None,
        }
    }
}

/// Public key block of an arbitrary-message signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// Raw `signArbitrary` answer from an extension. Any field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignArbitraryResponse {
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub pub_key: Option<PubKey>,
}

/// A validated signature over a user-supplied message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedMessage {
    pub signature: String,
    pub public_key: String,
}

impl TryFrom<SignArbitraryResponse> for SignedMessage {
    type Error = WalletError;

    fn try_from(response: SignArbitraryResponse) -> Result<Self, Self::Error> {
        let signature = response
            .signature
            .filter(|s| !s.is_empty())
            .ok_or(WalletError::InvalidSignature)?;
        let public_key = response
            .pub_key
            .and_then(|k| k.value)
            .filter(|v| !v.is_empty())
            .ok_or(WalletError::InvalidSignature)?;

        Ok(Self {
            signature,
            public_key,
        })
    }
}
