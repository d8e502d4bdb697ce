//! Error types for the wallet, catalog and storage layers

use crate::wallet::WalletProvider;
use thiserror::Error;

pub type WalletResult<T> = Result<T, WalletError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("{} wallet not found. Please install the extension.", .0.display_name())]
    ProviderNotInstalled(WalletProvider),

    #[error("Invalid wallet provider: {0}")]
    UnknownProvider(String),

    #[error("Invalid wallet response received: {0}")]
    InvalidSessionResponse(String),

    #[error("Connection was cancelled by user")]
    UserRejected,

    #[error("Network error: {0}")]
    Network(String),

    #[error("{operation} not supported for {provider}")]
    UnsupportedOperation {
        provider: WalletProvider,
        operation: &'static str,
    },

    #[error("Too many failed connection attempts for {0}")]
    TooManyAttempts(WalletProvider),

    #[error("No wallet connected")]
    NotConnected,

    #[error("{0}")]
    Provider(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failure reported by an injected wallet object. Browser bridges only hand
/// back a message, so the kind is recovered from its text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderCallError {
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Failed(String),
}

impl ProviderCallError {
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        if lower.contains("user rejected") {
            ProviderCallError::Rejected(message)
        } else if lower.contains("network") {
            ProviderCallError::Network(message)
        } else {
            ProviderCallError::Failed(message)
        }
    }
}

impl From<ProviderCallError> for WalletError {
    fn from(e: ProviderCallError) -> Self {
        match e {
            ProviderCallError::Rejected(_) => WalletError::UserRejected,
            ProviderCallError::Network(m) => WalletError::Network(m),
            ProviderCallError::Failed(m) => WalletError::Provider(m),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Failed to fetch {resource}: {reason}")]
    Fetch {
        resource: &'static str,
        reason: String,
    },

    #[error("Catalog data error: {0}")]
    Data(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Json(e.to_string())
    }
}
