//! View model handed to the presentation shell on every render
//!
//! Pure mapping from (connection status, directory, dropdown, config) to what the shell
//! draws. No I/O, nothing mutable.

use serde::Serialize;

use crate::config::PickerConfig;
use crate::controller::DropdownState;
use crate::directory::DirectorySnapshot;
use crate::status::{ChainInfo, ConnectionPhase, ConnectionStatus};

/// One selectable alternative in the dropdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressEntry {
    pub address: String,
    pub display: String,
}

/// Chain button contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainBadge {
    pub name: Option<String>,
    pub has_icon: bool,
    pub icon_url: Option<String>,
    pub icon_background: Option<String>,
}

impl From<&ChainInfo> for ChainBadge {
    fn from(chain: &ChainInfo) -> Self {
        Self {
            name: chain.name.clone(),
            has_icon: chain.has_icon,
            icon_url: chain.icon_url.clone(),
            icon_background: chain.icon_background.clone(),
        }
    }
}

/// What the button shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ButtonMode {
    /// Connect button (opens the connect modal)
    Connect,
    /// Wrong network button (opens the chain modal)
    WrongNetwork,
    /// Chain badge, account label and the address picker
    #[serde(rename_all = "camelCase")]
    Account {
        chain: ChainBadge,
        label: String,
        dropdown: DropdownState,
        alternatives: Vec<AddressEntry>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonView {
    /// Rendered but invisible and inert until the connection library is ready
    pub hidden: bool,
    pub phase: ConnectionPhase,
    pub mode: ButtonMode,
}

impl ButtonView {
    pub fn build(
        status: &ConnectionStatus,
        directory: &DirectorySnapshot,
        dropdown: DropdownState,
        config: &PickerConfig,
    ) -> Self {
        let phase = status.phase();
        let mode = match (phase, status.account.as_ref(), status.chain.as_ref()) {
            (ConnectionPhase::NotReady | ConnectionPhase::Disconnected, _, _) => ButtonMode::Connect,
            (ConnectionPhase::UnsupportedChain, _, _) => ButtonMode::WrongNetwork,
            (ConnectionPhase::Connected, Some(account), Some(chain)) => ButtonMode::Account {
                chain: ChainBadge::from(chain),
                label: directory
                    .selected
                    .as_deref()
                    .map(|addr| config.format_address(addr))
                    .unwrap_or_else(|| account.display_name.clone()),
                dropdown,
                alternatives: alternatives(directory, dropdown, config),
            },
            // connected() guarantees account and chain
            (ConnectionPhase::Connected, _, _) => ButtonMode::Connect,
        };
        Self { hidden: phase == ConnectionPhase::NotReady, phase, mode }
    }
}

/// Addresses offered in the open dropdown: everything but the selected one, in
/// provider order. Empty when closed or when there is nothing to switch to.
pub fn alternatives(
    directory: &DirectorySnapshot,
    dropdown: DropdownState,
    config: &PickerConfig,
) -> Vec<AddressEntry> {
    if !dropdown.is_open() || directory.addresses.len() < config.min_addresses_for_list {
        return Vec::new();
    }
    directory
        .addresses
        .iter()
        .filter(|addr| directory.selected.as_deref() != Some(addr.as_str()))
        .map(|addr| AddressEntry { address: addr.clone(), display: config.format_address(addr) })
        .collect()
}
