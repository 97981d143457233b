//! Data model: the virtual filesystem and its persistence
//!
//! Everything here is pure Rust and WASM-compatible.

pub mod contacts;
pub mod storage;
pub mod vfs;
