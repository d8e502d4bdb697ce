//! Wallet module - browser extension wallets behind one adapter trait
//!
//! The session store never touches extension objects directly. It asks the
//! injected [`WalletEnvironment`] for a global and hands it to the adapter
//! selected by [`adapter_for`].
//!
//! # Architecture
//!
//! ```text
//! WalletStore (session, timers, descriptor)
//!     │
//!     ├── SessionStorage ── "bitbasel_wallet" → {provider, address, timestamp, version}
//!     │
//!     └── adapter_for(provider) → WalletAdapter
//!                                     │
//!                                     ▼
//!                         WalletEnvironment::global(name)
//!                                     │
//!                                     ▼
//!                         InjectedProvider::call(method, params)
//! ```
//!
//! # Topics
//!
//! | Path | Published when |
//! |------|----------------|
//! | `/wallet/session` | connect, disconnect |
//! | `/wallet/balance` | a balance refresh lands |
//! | `/wallet/connecting` | a connect starts or settles |
//! | `/wallet/error` | an error is shown or cleared |
//! | `/wallet/transactions` | a send is tracked |

pub mod adapters;
pub mod environment;
mod provider;
mod session;
#[cfg(feature = "native")]
mod store;

pub use adapters::{adapter_for, LiveAccount, WalletAdapter};
pub use environment::{
    InjectedProvider, ScriptedEnvironment, ScriptedEnvironmentDef, ScriptedProvider, ScriptedProviderDef,
    ScriptedReply, WalletEnvironment,
};
pub use provider::{Network, WalletProvider};
pub use session::{
    short_address, DescriptorError, PersistedSessionDescriptor, SessionResponse, TransactionStatus, TxState,
    WalletSession, SATS_PER_BTC,
};
#[cfg(feature = "native")]
pub use store::{DisplayedError, ErrorKind, ProviderOption, RestoreOutcome, WalletStore};
