//! Provider gateway - the seam to the wallet connection library
//!
//! The core never talks to a wallet directly. A [`ConnectorSource`] tells it which
//! [`Connector`] is active (if any), the connector hands out a [`Provider`], and the
//! provider answers EIP-1193 style requests.
//!
//! ```text
//! ConnectorSource ──active()──▶ Connector ──provider()──▶ Provider
//!                                                            │
//!                                            request({method: "eth_accounts"})
//!                                                            ▼
//!                                                     ["0xAAA…", "0xBBB…"]
//! ```
//!
//! Everything here is `?Send`: the picker lives on a single UI thread.

mod memory;

pub use memory::{MemoryConnector, MemoryProvider};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

use crate::core::consts::rpc::ETH_ACCOUNTS;

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Provider errors
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Malformed provider response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Provider bridge error: {0}")]
    Bridge(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// EIP-1193 request payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RpcRequest {
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl RpcRequest {
    pub fn new(method: impl Into<String>) -> Self {
        Self { method: method.into(), params: None }
    }
}

/// A wallet provider capable of answering requests
#[async_trait(?Send)]
pub trait Provider {
    async fn request(&self, request: RpcRequest) -> ProviderResult<Value>;

    /// List the account addresses the provider currently exposes, in provider order
    async fn list_accounts(&self) -> ProviderResult<Vec<String>> {
        let value = self.request(RpcRequest::new(ETH_ACCOUNTS)).await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// An active wallet connection
#[async_trait(?Send)]
pub trait Connector {
    fn id(&self) -> &str;

    async fn provider(&self) -> ProviderResult<Rc<dyn Provider>>;
}

/// Read-only accessor for the currently active connector
pub trait ConnectorSource {
    fn active(&self) -> Option<Rc<dyn Connector>>;
}

/// Settable connector slot. Host code updates it when the wallet connects or disconnects.
#[derive(Clone, Default)]
pub struct ActiveConnector {
    slot: Rc<RefCell<Option<Rc<dyn Connector>>>>,
}

impl ActiveConnector {
    pub fn new() -> Self { Self::default() }

    pub fn set(&self, connector: Rc<dyn Connector>) {
        tracing::debug!(connector = connector.id(), "connector active");
        *self.slot.borrow_mut() = Some(connector);
    }

    pub fn clear(&self) {
        if self.slot.borrow_mut().take().is_some() {
            tracing::debug!("connector cleared");
        }
    }

    pub fn is_set(&self) -> bool { self.slot.borrow().is_some() }
}

impl ConnectorSource for ActiveConnector {
    fn active(&self) -> Option<Rc<dyn Connector>> {
        self.slot.borrow().clone()
    }
}
