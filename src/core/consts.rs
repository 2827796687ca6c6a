//! Method names, error codes and display defaults
//!
//! Centralized registry for everything the core sends to or expects from a
//! wallet provider.

/// EIP-1193 request methods
pub mod rpc {
    pub const ETH_ACCOUNTS: &str = "eth_accounts";
}

/// EIP-1193 provider error codes
pub mod rpc_codes {
    pub const UNSUPPORTED_METHOD: i64 = 4200;
    pub const DISCONNECTED: i64 = 4900;
}

/// Address truncation defaults (`0x1234...abcd`)
pub mod display {
    pub const HEAD_CHARS: usize = 6;
    pub const TAIL_CHARS: usize = 4;
    pub const ELLIPSIS: &str = "...";
    /// The picker list only renders when it has something to switch to
    pub const MIN_ADDRESSES_FOR_LIST: usize = 2;
}

/// JS method names on the objects the browser host hands in
pub mod js {
    pub const GET_PROVIDER: &str = "getProvider";
    pub const REQUEST: &str = "request";
    pub const OPEN_CONNECT_MODAL: &str = "openConnectModal";
    pub const OPEN_CHAIN_MODAL: &str = "openChainModal";
    pub const OPEN_ACCOUNT_MODAL: &str = "openAccountModal";
}

/// Environment variables read by native hosts
pub mod env {
    pub const LOG_JSON: &str = "CONNECTBAR_LOG_JSON";
}
