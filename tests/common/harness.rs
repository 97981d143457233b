use std::time::Duration;

use crt_terminal::app::{Console, Shell};
use crt_terminal::config::Config;
use crt_terminal::input::{KeyCode, KeyEvent, KeyModifiers};
use crt_terminal::model::storage::{shared, MemoryStorage, StorageHandle};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// Drives a [`Console`] through a virtual terminal of fixed size
pub struct ConsoleTestHarness {
    console: Console,
    terminal: Terminal<TestBackend>,
    storage: StorageHandle,
}

impl ConsoleTestHarness {
    /// A harness with default config and empty in-memory storage
    pub fn new(width: u16, height: u16) -> Self {
        Self::with_storage(width, height, shared(MemoryStorage::new()))
    }

    /// A harness whose shell persists into `storage`
    pub fn with_storage(width: u16, height: u16, storage: StorageHandle) -> Self {
        Self::with_config(width, height, Config::default(), storage)
    }

    pub fn with_config(width: u16, height: u16, config: Config, storage: StorageHandle) -> Self {
        super::tracing::init_tracing_from_env();
        let shell = Shell::new(config, storage.clone(), 42);
        let terminal = Terminal::new(TestBackend::new(width, height))
            .unwrap_or_else(|e| panic!("failed to create test terminal: {e}"));
        Self {
            console: Console::new(shell),
            terminal,
            storage,
        }
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    pub fn shell(&self) -> &Shell {
        self.console.shell()
    }

    pub fn storage(&self) -> StorageHandle {
        self.storage.clone()
    }

    pub fn send_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.console.handle_key(KeyEvent::new(code, modifiers));
    }

    /// Type `text` one key at a time
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.send_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
    }

    /// Type `text` and press Enter
    pub fn enter_line(&mut self, text: &str) {
        self.type_text(text);
        self.send_key(KeyCode::Enter, KeyModifiers::NONE);
    }

    /// Deliver one frame of `elapsed`, however long
    pub fn tick(&mut self, elapsed: Duration) {
        self.console.tick(elapsed);
    }

    /// Advance timers in frame-sized steps
    pub fn advance(&mut self, total: Duration) {
        let frame = Duration::from_millis(33);
        let mut left = total;
        while left > Duration::ZERO {
            let step = left.min(frame);
            self.console.tick(step);
            left -= step;
        }
    }

    pub fn render(&mut self) {
        let console = &mut self.console;
        self.terminal
            .draw(|frame| console.render(frame))
            .unwrap_or_else(|e| panic!("draw failed: {e}"));
    }

    /// Render and return the screen as text, one row per line
    pub fn screen_to_string(&mut self) -> String {
        self.render();
        let buffer = self.terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn assert_screen_contains(&mut self, needle: &str) {
        let screen = self.screen_to_string();
        assert!(
            screen.contains(needle),
            "expected screen to contain {needle:?}, got:\n{screen}"
        );
    }

    pub fn take_clipboard(&mut self) -> Vec<String> {
        self.console.take_clipboard()
    }
}
