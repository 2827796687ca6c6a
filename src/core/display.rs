//! Address display helpers
//!
//! Wallet addresses are shown as `head...tail`, e.g. `0x71C7...976F`.

use super::consts::display::{ELLIPSIS, HEAD_CHARS, TAIL_CHARS};

/// Truncate an address to its first `head` and last `tail` characters.
///
/// Addresses that already fit in `head + tail` characters are returned unchanged.
pub fn truncate_address(address: &str, head: usize, tail: usize, ellipsis: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= head.saturating_add(tail) {
        return address.to_string();
    }
    let start: String = chars[..head].iter().collect();
    let end: String = chars[chars.len() - tail..].iter().collect();
    format!("{}{}{}", start, ellipsis, end)
}

/// Truncate with the default 6/4 policy
pub fn short_address(address: &str) -> String {
    truncate_address(address, HEAD_CHARS, TAIL_CHARS, ELLIPSIS)
}
