//! Path and key constants
//!
//! Centralized registry for change-notification topics, storage keys and the
//! names of injected wallet globals.

/// Wallet store topics
pub mod wallet {
    pub const SESSION: &str = "/wallet/session";
    pub const BALANCE: &str = "/wallet/balance";
    pub const CONNECTING: &str = "/wallet/connecting";
    pub const ERROR: &str = "/wallet/error";
    pub const TRANSACTIONS: &str = "/wallet/transactions";

    pub const ALL: &[&str] = &[SESSION, BALANCE, CONNECTING, ERROR, TRANSACTIONS];
}

/// Catalog store topics
pub mod market {
    pub const INSCRIPTIONS: &str = "/market/inscriptions";
    pub const COLLECTIONS: &str = "/market/collections";
    pub const GALLERIES: &str = "/market/galleries";
    pub const STATS: &str = "/market/stats";
    pub const PRICES: &str = "/market/prices";
    pub const VIEW: &str = "/market/view";
    pub const SELECTION: &str = "/market/selection";
    pub const STATUS: &str = "/market/status";

    pub const ALL: &[&str] = &[INSCRIPTIONS, COLLECTIONS, GALLERIES, STATS, PRICES, VIEW, SELECTION, STATUS];
}

/// Local storage keys
pub mod storage {
    pub const WALLET: &str = "bitbasel_wallet";
    pub const DESCRIPTOR_VERSION: &str = "1.0";
}

/// Globals injected by wallet extensions
pub mod globals {
    pub const UNISAT: &str = "unisat";
    pub const XVERSE_BITCOIN: &str = "BitcoinProvider";
    pub const XVERSE_STACKS: &str = "StacksProvider";
    pub const ORDINALS_WALLET: &str = "ordinalsWallet";
    pub const LEATHER: &str = "LeatherProvider";
    pub const PHANTOM_BITCOIN: &str = "phantom.bitcoin";
}
