//! View layer
//!
//! The output stream the shell writes into, the effects it requests and the
//! ratatui rendering of both. Everything here is pure Rust/ratatui and
//! WASM-compatible.

pub mod banner;
pub mod effects;
pub mod neofetch;
pub mod output;
pub mod render;
pub mod theme;
