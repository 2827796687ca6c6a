//! JS bridge - wraps host objects as connector, provider and modals

use async_trait::async_trait;
use futures::future::LocalBoxFuture;
use serde_json::Value;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::log;
use crate::controller::Spawner;
use crate::core::consts::js;
use crate::provider::{Connector, Provider, ProviderError, ProviderResult, RpcRequest};
use crate::status::WalletModals;

/// Call `target[method](...args)`, awaiting the result if it is a promise
async fn call_method(target: &JsValue, method: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
    let function = js_sys::Reflect::get(target, &JsValue::from_str(method))?
        .dyn_into::<js_sys::Function>()
        .map_err(|_| JsValue::from_str(&format!("{} is not a function", method)))?;

    let result = function.apply(target, &js_sys::Array::from_iter(args.iter()))?;
    if result.has_type::<js_sys::Promise>() {
        JsFuture::from(result.unchecked_into::<js_sys::Promise>()).await
    } else {
        Ok(result)
    }
}

/// EIP-1193 rejections carry `{code, message}`; anything else is a bridge error
fn provider_error(err: JsValue) -> ProviderError {
    let field = |name: &str| js_sys::Reflect::get(&err, &JsValue::from_str(name)).ok();
    let code = field("code").and_then(|v| v.as_f64());
    let message = field("message").and_then(|v| v.as_string());
    match (code, message) {
        (Some(code), Some(message)) => ProviderError::Rpc { code: code as i64, message },
        (_, Some(message)) => ProviderError::Bridge(message),
        _ => ProviderError::Bridge(format!("{:?}", err)),
    }
}

/// EIP-1193 provider object (`provider.request({method, params})`)
pub struct JsProvider {
    inner: JsValue,
}

impl JsProvider {
    pub fn new(inner: JsValue) -> Self { Self { inner } }
}

#[async_trait(?Send)]
impl Provider for JsProvider {
    async fn request(&self, request: RpcRequest) -> ProviderResult<Value> {
        let args = serde_wasm_bindgen::to_value(&request)
            .map_err(|e| ProviderError::Bridge(e.to_string()))?;
        let result = call_method(&self.inner, js::REQUEST, &[args])
            .await
            .map_err(provider_error)?;
        serde_wasm_bindgen::from_value(result).map_err(|e| ProviderError::Bridge(e.to_string()))
    }
}

/// Connector object exposing `getProvider()` (sync or async)
pub struct JsConnector {
    id: String,
    inner: JsValue,
}

impl JsConnector {
    pub fn new(inner: JsValue) -> Self {
        let id = js_sys::Reflect::get(&inner, &JsValue::from_str("id"))
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_else(|| "unknown".into());
        Self { id, inner }
    }
}

#[async_trait(?Send)]
impl Connector for JsConnector {
    fn id(&self) -> &str { &self.id }

    async fn provider(&self) -> ProviderResult<Rc<dyn Provider>> {
        let provider = call_method(&self.inner, js::GET_PROVIDER, &[])
            .await
            .map_err(provider_error)?;
        if provider.is_undefined() || provider.is_null() {
            return Err(ProviderError::Unavailable(format!("connector {} returned no provider", self.id)));
        }
        Ok(Rc::new(JsProvider::new(provider)))
    }
}

/// Modal openers from the connection library
pub struct JsModals {
    inner: JsValue,
}

impl JsModals {
    pub fn new(inner: JsValue) -> Self { Self { inner } }

    fn open(&self, method: &'static str) {
        let result = js_sys::Reflect::get(&self.inner, &JsValue::from_str(method))
            .and_then(|f| f.dyn_into::<js_sys::Function>().map_err(|_| JsValue::from_str("not a function")))
            .and_then(|f| f.call0(&self.inner));
        if let Err(e) = result {
            log!("[WalletPicker] {} failed: {:?}", method, e);
        }
    }
}

impl WalletModals for JsModals {
    fn open_connect_modal(&self) { self.open(js::OPEN_CONNECT_MODAL) }
    fn open_chain_modal(&self) { self.open(js::OPEN_CHAIN_MODAL) }
    fn open_account_modal(&self) { self.open(js::OPEN_ACCOUNT_MODAL) }
}

/// Runs refresh tasks on the browser microtask queue
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSpawner;

impl Spawner for BrowserSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
