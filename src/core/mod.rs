//! Shared building blocks: constants and display helpers (compile everywhere)

pub mod consts;
pub mod display;
