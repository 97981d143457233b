//! WASM browser build
//!
//! The page owns the DOM and the animation loop; it forwards keys, pastes and
//! frame deltas to [`WasmTerminal`] and paints the text grid returned by
//! [`WasmTerminal::render`]. The shell core is the same one the native runtime
//! drives.

pub mod web_storage;

use std::time::Duration;

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::Terminal;
use wasm_bindgen::prelude::*;

use crate::app::{Console, Shell};
use crate::config::Config;
use crate::input::keys::from_dom_key;
use crate::model::storage::{shared, MemoryStorage};
use web_storage::WebStorage;

/// Rows of a rendered buffer as plain text
fn buffer_text(buffer: &Buffer) -> String {
    let width = usize::from(buffer.area.width.max(1));
    buffer
        .content()
        .chunks(width)
        .map(|row| {
            let line: String = row.iter().map(|cell| cell.symbol()).collect();
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// WASM-exported terminal handle
#[wasm_bindgen]
pub struct WasmTerminal {
    console: Console,
    terminal: Terminal<TestBackend>,
}

#[wasm_bindgen]
impl WasmTerminal {
    /// Create a terminal of `width` x `height` cells backed by `localStorage`
    #[wasm_bindgen(constructor)]
    pub fn new(width: u16, height: u16) -> Result<WasmTerminal, JsValue> {
        console_error_panic_hook::set_once();

        let storage = match WebStorage::open() {
            Ok(storage) => shared(storage),
            Err(e) => {
                web_sys::console::warn_1(&format!("{e}, keeping state in memory").into());
                shared(MemoryStorage::new())
            }
        };
        let mut shell = Shell::new(Config::default(), storage, rand::random());
        shell.welcome();
        let terminal = Terminal::new(TestBackend::new(width, height))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self {
            console: Console::new(shell),
            terminal,
        })
    }

    /// Handle a `KeyboardEvent`; returns false for keys the terminal ignores
    pub fn key(&mut self, key: &str, ctrl: bool, alt: bool, shift: bool) -> bool {
        match from_dom_key(key, ctrl, alt, shift) {
            Some(event) => {
                self.console.handle_key(event);
                true
            }
            None => false,
        }
    }

    pub fn paste(&mut self, text: &str) {
        self.console.paste(text);
    }

    /// Submit a whole line, as if typed and entered
    pub fn submit(&mut self, line: &str) {
        self.console.submit(line);
    }

    /// Advance timers by `millis` since the previous frame
    pub fn tick(&mut self, millis: f64) {
        let millis = if millis.is_finite() { millis.max(0.0) } else { 0.0 };
        self.console.tick(Duration::from_secs_f64(millis / 1000.0));
    }

    pub fn resize(&mut self, width: u16, height: u16) -> Result<(), JsValue> {
        self.terminal.backend_mut().resize(width, height);
        self.terminal.autoresize().map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Draw a frame and return it as newline-separated rows
    pub fn render(&mut self) -> Result<String, JsValue> {
        let console = &mut self.console;
        self.terminal
            .draw(|frame| console.render(frame))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(buffer_text(self.terminal.backend().buffer()))
    }

    /// The output stream as JSON, for pages that style entries themselves
    pub fn output_json(&self) -> Result<String, JsValue> {
        let entries: Vec<_> = self.console.shell().output().entries().collect();
        serde_json::to_string(&entries).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn prompt(&self) -> String {
        self.console.shell().prompt()
    }

    pub fn is_interactive(&self) -> bool {
        self.console.shell().is_interactive()
    }

    /// Clipboard writes requested since the last call; the page performs them
    pub fn take_clipboard(&mut self) -> Vec<String> {
        self.console.take_clipboard()
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    web_sys::console::log_1(&"CRT terminal WASM module loaded".into());
}
