//! Connection Status Adapter - what the wallet connection library reports
//!
//! The host fills a [`ConnectionStatus`] from its wallet library on every render and
//! implements [`WalletModals`] with the library's modal openers.

use serde::{Deserialize, Serialize};

/// Authentication state reported by the connection library (absent when the app
/// does not use authentication)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthenticationStatus {
    Loading,
    Unauthenticated,
    Authenticated,
}

/// The account the connection library considers connected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    pub address: String,
    pub display_name: String,
}

/// The chain the wallet is on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChainInfo {
    pub id: u64,
    pub name: Option<String>,
    pub unsupported: bool,
    pub has_icon: bool,
    pub icon_url: Option<String>,
    pub icon_background: Option<String>,
}

/// Snapshot of the connection library's state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionStatus {
    pub mounted: bool,
    pub authentication_status: Option<AuthenticationStatus>,
    pub account: Option<AccountInfo>,
    pub chain: Option<ChainInfo>,
}

/// Coarse connection phase the button renders from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionPhase {
    NotReady,
    Disconnected,
    UnsupportedChain,
    Connected,
}

impl ConnectionStatus {
    pub fn ready(&self) -> bool {
        self.mounted && self.authentication_status != Some(AuthenticationStatus::Loading)
    }

    pub fn connected(&self) -> bool {
        self.ready()
            && self.account.is_some()
            && self.chain.is_some()
            && matches!(self.authentication_status, None | Some(AuthenticationStatus::Authenticated))
    }

    pub fn phase(&self) -> ConnectionPhase {
        if !self.ready() {
            ConnectionPhase::NotReady
        } else if !self.connected() {
            ConnectionPhase::Disconnected
        } else if self.chain.as_ref().map(|c| c.unsupported).unwrap_or(false) {
            ConnectionPhase::UnsupportedChain
        } else {
            ConnectionPhase::Connected
        }
    }
}

/// Modal openers exposed by the connection library
pub trait WalletModals {
    fn open_connect_modal(&self);
    fn open_chain_modal(&self);
    fn open_account_modal(&self);
}
