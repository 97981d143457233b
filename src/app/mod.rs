//! The shell
//!
//! [`Shell`] is the context object owning all terminal state: working
//! directory, history, the line being typed, the session slot, the filesystem,
//! the contacts log, the output stream and the queue of requested effects.
//! Front ends (the native runtime, the browser build, the test harness) feed
//! it keys and ticks, render its output and drain its effects.

pub mod commands;
pub mod console;

use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::input::{
    complete_command, CommandHistory, KeyCode, KeyEvent, KeyModifiers, LineEditor,
};
use crate::model::contacts::ContactLog;
use crate::model::storage::StorageHandle;
use crate::model::vfs::Vfs;
use crate::session::{Session, SessionCx, SessionError, SessionManager};
use crate::view::banner::{LOGO, WELCOME_DIVIDER, WELCOME_HINT, WELCOME_TEXT};
use crate::view::effects::Effect;
use crate::view::output::{LineStyle, Output};

pub use commands::{CommandKind, CommandOutput, CommandSpec, COMMANDS};
pub use console::Console;

pub struct Shell {
    config: Config,
    cwd: String,
    history: CommandHistory,
    line: LineEditor,
    sessions: SessionManager,
    vfs: Vfs,
    contacts: ContactLog,
    output: Output,
    effects: Vec<Effect>,
    rng: StdRng,
    uptime: Duration,
    screen: (u16, u16),
}

/// Split borrow of the shell fields a session may touch
macro_rules! session_cx {
    ($shell:expr) => {
        SessionCx {
            output: &mut $shell.output,
            vfs: &mut $shell.vfs,
            contacts: &mut $shell.contacts,
            effects: &mut $shell.effects,
            config: &$shell.config,
            rng: &mut $shell.rng,
            cwd: &$shell.cwd,
            pending: $shell.line.text(),
        }
    };
}

impl Shell {
    /// Create a shell whose filesystem and contacts live in `storage`
    ///
    /// `seed` drives every random choice (snake food), so equal seeds replay
    /// equal games.
    pub fn new(config: Config, storage: StorageHandle, seed: u64) -> Self {
        let vfs = Vfs::load(storage.clone(), config.home.clone());
        Self {
            cwd: vfs.home().to_string(),
            history: CommandHistory::new(config.history_limit),
            line: LineEditor::new(),
            sessions: SessionManager::new(),
            vfs,
            contacts: ContactLog::new(storage),
            output: Output::new(config.output_limit),
            effects: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            uptime: Duration::ZERO,
            screen: (80, 24),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn line(&self) -> &LineEditor {
        &self.line
    }

    pub fn output(&self) -> &Output {
        &self.output
    }

    pub fn vfs(&self) -> &Vfs {
        &self.vfs
    }

    pub fn vfs_mut(&mut self) -> &mut Vfs {
        &mut self.vfs
    }

    pub fn contacts(&self) -> &ContactLog {
        &self.contacts
    }

    pub fn session(&self) -> Option<&Session> {
        self.sessions.active()
    }

    pub fn is_interactive(&self) -> bool {
        self.sessions.is_active()
    }

    pub fn uptime(&self) -> Duration {
        self.uptime
    }

    /// Record the terminal size (shown by `neofetch`)
    pub fn set_screen_size(&mut self, width: u16, height: u16) {
        self.screen = (width, height);
    }

    /// The prompt: `user@host:cwd$` with the home directory shown as `~`
    pub fn prompt(&self) -> String {
        let home = self.vfs.home();
        let shown = if self.cwd == home {
            "~".to_string()
        } else if let Some(rest) = self.cwd.strip_prefix(home).filter(|r| r.starts_with('/')) {
            format!("~{rest}")
        } else {
            self.cwd.clone()
        };
        format!("{}@{}:{}$", self.config.user, self.config.host, shown)
    }

    pub fn welcome(&mut self) {
        self.output.append_block(LOGO, LineStyle::Ascii);
        self.output.append_line(WELCOME_TEXT, LineStyle::Welcome);
        self.output.append_line(WELCOME_HINT, LineStyle::Info);
        self.output.append_line(WELCOME_DIVIDER, LineStyle::Divider);
    }

    /// Requested effects, oldest first
    pub fn drain_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Handle one submitted line
    ///
    /// While a session is active the raw line goes to it untouched and is not
    /// recorded. Otherwise the line is trimmed; blank lines do nothing.
    pub fn submit(&mut self, raw: &str) {
        if self.sessions.is_active() {
            self.sessions.dispatch(raw, &mut session_cx!(self));
            return;
        }

        let line = raw.trim();
        if line.is_empty() {
            return;
        }

        self.history.push(line);
        let echo = format!("{} {}", self.prompt(), line);
        self.output.append_line(echo, LineStyle::Command);

        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return;
        };
        let name = name.to_lowercase();
        let args: Vec<&str> = parts.collect();

        match commands::lookup(&name) {
            Some(kind) => {
                tracing::debug!("Running command {:?}", kind);
                let result = self.run_command(kind, &args);
                self.render_result(result);
            }
            None => {
                self.output
                    .append_line(format!("Command not found: {name}"), LineStyle::Error);
                self.output
                    .append_line("Type \"help\" for available commands.", LineStyle::Normal);
            }
        }
    }

    fn render_result(&mut self, result: CommandOutput) {
        match result {
            CommandOutput::NoOutput => {}
            CommandOutput::Text(text) => self.output.append_text(&text, LineStyle::Normal),
            CommandOutput::Structured { kind, payload } => {
                self.output.append_structured(kind, payload);
            }
        }
    }

    /// Start a session, printing the refusal when another one is running
    pub(crate) fn start_session<F>(&mut self, factory: F) -> Result<(), SessionError>
    where
        F: FnOnce(&mut SessionCx) -> Option<Session>,
    {
        let result = self.sessions.try_start(&mut session_cx!(self), factory);
        if let Err(e) = &result {
            self.output.append_line(e.to_string(), LineStyle::Error);
        }
        result
    }

    /// Route a key: session interceptor first, then the line editor
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.sessions.handle_key(&key, &mut session_cx!(self)) {
            // A session closed by a key leaves nothing half-typed at the prompt
            if !self.sessions.is_active() {
                self.line.clear();
            }
            return;
        }

        let interactive = self.sessions.is_active();
        match key.code {
            KeyCode::Enter => {
                let line = self.line.take();
                self.history.reset_cursor();
                self.submit(&line);
            }
            KeyCode::Up if !interactive => {
                if let Some(entry) = self.history.older() {
                    let entry = entry.to_string();
                    self.line.set(&entry);
                }
            }
            KeyCode::Down if !interactive => {
                if let Some(entry) = self.history.newer() {
                    let entry = entry.to_string();
                    self.line.set(&entry);
                }
            }
            KeyCode::Tab if !interactive => {
                let completed = complete_command(self.line.text(), commands::names());
                if let Some(name) = completed {
                    self.line.set(name);
                }
            }
            KeyCode::Backspace => self.line.backspace(),
            KeyCode::Delete => self.line.delete(),
            KeyCode::Left => self.line.move_left(),
            KeyCode::Right => self.line.move_right(),
            KeyCode::Home => self.line.move_home(),
            KeyCode::End => self.line.move_end(),
            KeyCode::Char(c)
                if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.line.insert_char(c)
            }
            _ => {}
        }
    }

    /// Insert pasted text at the cursor (line breaks are dropped)
    pub fn paste(&mut self, text: &str) {
        self.line.insert_str(text);
    }

    /// Advance timers by `elapsed`
    pub fn tick(&mut self, elapsed: Duration) {
        self.uptime += elapsed;
        self.sessions.tick(elapsed, &mut session_cx!(self));
    }
}
