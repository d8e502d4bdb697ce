//! Supported wallet providers and networks

use crate::error::WalletError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WalletProvider {
    Unisat,
    Xverse,
    OrdinalsWallet,
    Leather,
    Phantom,
}

impl WalletProvider {
    pub const ALL: [WalletProvider; 5] = [
        WalletProvider::Unisat,
        WalletProvider::Xverse,
        WalletProvider::OrdinalsWallet,
        WalletProvider::Leather,
        WalletProvider::Phantom,
    ];

    /// Tag used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            WalletProvider::Unisat => "unisat",
            WalletProvider::Xverse => "xverse",
            WalletProvider::OrdinalsWallet => "ordinals-wallet",
            WalletProvider::Leather => "leather",
            WalletProvider::Phantom => "phantom",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WalletProvider::Unisat => "Unisat",
            WalletProvider::Xverse => "Xverse",
            WalletProvider::OrdinalsWallet => "Ordinals",
            WalletProvider::Leather => "Leather",
            WalletProvider::Phantom => "Phantom",
        }
    }

    pub fn from_tag(value: &str) -> Option<Self> {
        WalletProvider::ALL.into_iter().find(|p| p.as_str() == value)
    }
}

impl fmt::Display for WalletProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WalletProvider {
    type Err = WalletError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        WalletProvider::from_tag(value).ok_or_else(|| WalletError::UnknownProvider(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
        }
    }

    /// Extensions report `livenet` for mainnet; anything else is a test network.
    pub fn from_extension(value: &str) -> Self {
        if value == "livenet" { Network::Mainnet } else { Network::Testnet }
    }
}
