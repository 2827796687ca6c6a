//! Shared fixtures: a provider whose answers the test releases by hand

#![allow(dead_code)]

use async_trait::async_trait;
use connectbar::{
    ActiveConnector, AddressDirectory, Connector, MemoryConnector, MemoryProvider, Provider,
    ProviderError, ProviderResult, RpcRequest,
};
use futures::channel::oneshot;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

pub const ADDR_A: &str = "0xAAA0000000000000000000000000000000001111";
pub const ADDR_B: &str = "0xBBB0000000000000000000000000000000002222";
pub const ADDR_C: &str = "0xCCC0000000000000000000000000000000003333";

pub type Responder = oneshot::Sender<ProviderResult<Value>>;

/// Each request takes the oldest scripted response and waits until the test sends it
#[derive(Clone, Default)]
pub struct DeferredProvider {
    pending: Rc<RefCell<VecDeque<oneshot::Receiver<ProviderResult<Value>>>>>,
    requests: Rc<Cell<usize>>,
}

impl DeferredProvider {
    pub fn expect(&self) -> Responder {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push_back(rx);
        tx
    }

    pub fn requests(&self) -> usize { self.requests.get() }
}

#[async_trait(?Send)]
impl Provider for DeferredProvider {
    async fn request(&self, _request: RpcRequest) -> ProviderResult<Value> {
        self.requests.set(self.requests.get() + 1);
        let rx = self
            .pending
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| ProviderError::Unavailable("no response scripted".into()))?;
        rx.await.map_err(|_| ProviderError::Unavailable("response dropped".into()))?
    }
}

pub struct DeferredConnector(pub DeferredProvider);

#[async_trait(?Send)]
impl Connector for DeferredConnector {
    fn id(&self) -> &str { "deferred" }

    async fn provider(&self) -> ProviderResult<Rc<dyn Provider>> {
        Ok(Rc::new(self.0.clone()))
    }
}

pub fn accounts(list: &[&str]) -> ProviderResult<Value> {
    Ok(json!(list))
}

/// Directory over an in-memory wallet exposing `list`
pub fn memory_directory(list: &[&str]) -> (AddressDirectory, MemoryProvider, ActiveConnector) {
    let provider = MemoryProvider::with_accounts(list.iter().copied());
    let connectors = ActiveConnector::new();
    connectors.set(Rc::new(MemoryConnector::new("memory", provider.clone())));
    (AddressDirectory::new(Rc::new(connectors.clone())), provider, connectors)
}

/// Directory over a wallet whose answers the test releases
pub fn deferred_directory() -> (AddressDirectory, DeferredProvider) {
    let provider = DeferredProvider::default();
    let connectors = ActiveConnector::new();
    connectors.set(Rc::new(DeferredConnector(provider.clone())));
    (AddressDirectory::new(Rc::new(connectors)), provider)
}
