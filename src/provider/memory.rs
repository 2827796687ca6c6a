//! In-memory provider and connector (tests, simulations, native hosts)

use async_trait::async_trait;
use serde_json::{json, Value};
use std::cell::RefCell;
use std::rc::Rc;

use super::{Connector, Provider, ProviderError, ProviderResult, RpcRequest};
use crate::core::consts::{rpc::ETH_ACCOUNTS, rpc_codes};

#[derive(Debug, Default)]
struct MemoryAccounts {
    accounts: Vec<String>,
    failure: Option<String>,
    requests: usize,
}

/// Provider backed by a shared account list
#[derive(Clone, Default)]
pub struct MemoryProvider {
    inner: Rc<RefCell<MemoryAccounts>>,
}

impl MemoryProvider {
    pub fn new() -> Self { Self::default() }

    pub fn with_accounts<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let provider = Self::new();
        provider.set_accounts(accounts);
        provider
    }

    pub fn set_accounts<I, S>(&self, accounts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inner.borrow_mut().accounts = accounts.into_iter().map(Into::into).collect();
    }

    /// Make every following request fail with `message` until cleared with `None`
    pub fn set_failure(&self, message: Option<&str>) {
        self.inner.borrow_mut().failure = message.map(str::to_string);
    }

    pub fn accounts(&self) -> Vec<String> { self.inner.borrow().accounts.clone() }

    /// Number of requests served (including failed ones)
    pub fn requests(&self) -> usize { self.inner.borrow().requests }
}

#[async_trait(?Send)]
impl Provider for MemoryProvider {
    async fn request(&self, request: RpcRequest) -> ProviderResult<Value> {
        let mut inner = self.inner.borrow_mut();
        inner.requests += 1;
        if let Some(message) = &inner.failure {
            return Err(ProviderError::Rpc { code: rpc_codes::DISCONNECTED, message: message.clone() });
        }
        match request.method.as_str() {
            ETH_ACCOUNTS => Ok(json!(inner.accounts)),
            other => Err(ProviderError::Rpc {
                code: rpc_codes::UNSUPPORTED_METHOD,
                message: format!("unsupported method: {}", other),
            }),
        }
    }
}

/// Connector that always hands out the same [`MemoryProvider`]
#[derive(Clone)]
pub struct MemoryConnector {
    id: String,
    provider: MemoryProvider,
}

impl MemoryConnector {
    pub fn new(id: impl Into<String>, provider: MemoryProvider) -> Self {
        Self { id: id.into(), provider }
    }

    pub fn memory_provider(&self) -> &MemoryProvider { &self.provider }
}

#[async_trait(?Send)]
impl Connector for MemoryConnector {
    fn id(&self) -> &str { &self.id }

    async fn provider(&self) -> ProviderResult<Rc<dyn Provider>> {
        Ok(Rc::new(self.provider.clone()))
    }
}
