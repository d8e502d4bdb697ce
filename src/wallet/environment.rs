//! Wallet environment: the objects that browser extensions inject.
//!
//! The stores never reach into ambient globals. They ask a
//! [`WalletEnvironment`] for a global by name and talk to it through
//! [`InjectedProvider::call`], which mirrors invoking a method on the JS
//! object and awaiting its promise.
//!
//! [`ScriptedEnvironment`] answers from canned replies. The CLI loads one
//! from JSON and the tests drive it directly:
//!
//! ```json
//! {
//!   "globals": {
//!     "unisat": {
//!       "methods": {
//!         "requestAccounts": {"ok": ["bc1q..."]},
//!         "getPublicKey": {"ok": "02ab..."},
//!         "getBalance": {"ok": {"confirmed": 15000}},
//!         "getNetwork": {"ok": "livenet"},
//!         "signMessage": {"err": "User rejected the request."}
//!       }
//!     }
//!   }
//! }
//! ```

use crate::error::ProviderCallError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

#[async_trait]
pub trait InjectedProvider: Send + Sync {
    async fn call(&self, method: &str, params: Value) -> Result<Value, ProviderCallError>;
}

pub trait WalletEnvironment: Send + Sync {
    fn global(&self, name: &str) -> Option<Arc<dyn InjectedProvider>>;

    fn has_global(&self, name: &str) -> bool {
        self.global(name).is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptedReply {
    Ok(Value),
    Err(String),
}

impl ScriptedReply {
    pub fn ok(value: Value) -> Self {
        ScriptedReply::Ok(value)
    }

    pub fn err(message: impl Into<String>) -> Self {
        ScriptedReply::Err(message.into())
    }

    fn into_result(self) -> Result<Value, ProviderCallError> {
        match self {
            ScriptedReply::Ok(v) => Ok(v),
            ScriptedReply::Err(m) => Err(ProviderCallError::from_message(m)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptedProviderDef {
    #[serde(default)]
    pub methods: HashMap<String, ScriptedReply>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptedEnvironmentDef {
    #[serde(default)]
    pub globals: HashMap<String, ScriptedProviderDef>,
}

/// Injected object with a default reply per method plus one-shot queued
/// replies that take precedence. Every call is recorded.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    defaults: Mutex<HashMap<String, ScriptedReply>>,
    queued: Mutex<HashMap<String, VecDeque<ScriptedReply>>>,
    calls: Mutex<Vec<(String, Value)>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_def(def: ScriptedProviderDef) -> Self {
        Self { defaults: Mutex::new(def.methods), ..Self::default() }
    }

    pub fn on(self, method: &str, reply: ScriptedReply) -> Self {
        self.set(method, reply);
        self
    }

    /// Replace the default reply for `method`
    pub fn set(&self, method: &str, reply: ScriptedReply) {
        lock(&self.defaults).insert(method.to_string(), reply);
    }

    /// Queue a reply used once before falling back to the default
    pub fn push(&self, method: &str, reply: ScriptedReply) {
        lock(&self.queued).entry(method.to_string()).or_default().push_back(reply);
    }

    pub fn calls(&self, method: &str) -> usize {
        lock(&self.calls).iter().filter(|(m, _)| m == method).count()
    }

    pub fn call_log(&self) -> Vec<(String, Value)> {
        lock(&self.calls).clone()
    }
}

#[async_trait]
impl InjectedProvider for ScriptedProvider {
    async fn call(&self, method: &str, params: Value) -> Result<Value, ProviderCallError> {
        lock(&self.calls).push((method.to_string(), params));
        let queued = lock(&self.queued).get_mut(method).and_then(VecDeque::pop_front);
        let reply = queued.or_else(|| lock(&self.defaults).get(method).cloned());
        match reply {
            Some(reply) => reply.into_result(),
            None => Err(ProviderCallError::Failed(format!("{} is not a function", method))),
        }
    }
}

#[derive(Debug, Default)]
pub struct ScriptedEnvironment {
    globals: Mutex<HashMap<String, Arc<ScriptedProvider>>>,
}

impl ScriptedEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_def(def: ScriptedEnvironmentDef) -> Self {
        let globals = def
            .globals
            .into_iter()
            .map(|(name, p)| (name, Arc::new(ScriptedProvider::from_def(p))))
            .collect();
        Self { globals: Mutex::new(globals) }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::from_def(serde_json::from_str(raw)?))
    }

    pub fn install(&self, name: &str, provider: ScriptedProvider) -> Arc<ScriptedProvider> {
        let provider = Arc::new(provider);
        lock(&self.globals).insert(name.to_string(), provider.clone());
        provider
    }

    pub fn uninstall(&self, name: &str) {
        lock(&self.globals).remove(name);
    }

    pub fn provider(&self, name: &str) -> Option<Arc<ScriptedProvider>> {
        lock(&self.globals).get(name).cloned()
    }
}

impl WalletEnvironment for ScriptedEnvironment {
    fn global(&self, name: &str) -> Option<Arc<dyn InjectedProvider>> {
        let provider = lock(&self.globals).get(name).cloned()?;
        Some(provider as Arc<dyn InjectedProvider>)
    }
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|p| p.into_inner())
}
