//! Picker Configuration - passed from the host

use crate::core::consts::display::{ELLIPSIS, HEAD_CHARS, MIN_ADDRESSES_FOR_LIST, TAIL_CHARS};
use crate::core::display::truncate_address;

/// Display configuration. Hosts construct this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    pub head_chars: usize,
    pub tail_chars: usize,
    pub ellipsis: String,
    /// Smallest list size for which the alternatives are rendered
    pub min_addresses_for_list: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            head_chars: HEAD_CHARS,
            tail_chars: TAIL_CHARS,
            ellipsis: ELLIPSIS.into(),
            min_addresses_for_list: MIN_ADDRESSES_FOR_LIST,
        }
    }
}

impl PickerConfig {
    pub fn new() -> Self { Self::default() }
    pub fn with_truncation(mut self, head: usize, tail: usize) -> Self { self.head_chars = head; self.tail_chars = tail; self }
    pub fn with_ellipsis(mut self, e: impl Into<String>) -> Self { self.ellipsis = e.into(); self }
    pub fn with_min_addresses_for_list(mut self, n: usize) -> Self { self.min_addresses_for_list = n; self }

    pub fn format_address(&self, address: &str) -> String {
        truncate_address(address, self.head_chars, self.tail_chars, &self.ellipsis)
    }
}
