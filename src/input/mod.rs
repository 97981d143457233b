//! Input handling for the prompt line
//!
//! Pure modules (WASM-compatible): key events, the line buffer, tab
//! completion and history.

pub mod history;
pub mod keys;
pub mod line_editor;

pub use history::CommandHistory;
pub use keys::{KeyCode, KeyEvent, KeyModifiers};
pub use line_editor::{complete_command, LineEditor};
