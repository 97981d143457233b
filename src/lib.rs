// CRT terminal library - exposes all core modules for testing

// Core types and config are always available (needed for schema generation)
pub mod config;

// Pure modules (WASM-compatible)
pub mod app;
pub mod input;
pub mod model;
pub mod session;
pub mod view;

// WASM browser build modules
#[cfg(feature = "wasm")]
pub mod wasm;
