//! Front-end glue shared by the native runtime, the browser build and tests
//!
//! Owns the [`Shell`] together with the overlay layer and routes input in
//! priority order: a running overlay first, then the shell (whose active
//! session gets its own first look before the line editor).

use std::time::Duration;

use ratatui::Frame;

use super::Shell;
use crate::input::KeyEvent;
use crate::view::effects::EffectLayer;
use crate::view::render;
use crate::view::theme::Theme;

pub struct Console {
    shell: Shell,
    effects: EffectLayer,
    theme: Theme,
    clipboard: Vec<String>,
}

impl Console {
    pub fn new(shell: Shell) -> Self {
        let theme = Theme::from_name(&shell.config().theme);
        Self {
            shell,
            effects: EffectLayer::new(),
            theme,
            clipboard: Vec::new(),
        }
    }

    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    pub fn shell_mut(&mut self) -> &mut Shell {
        &mut self.shell
    }

    pub fn effects(&self) -> &EffectLayer {
        &self.effects
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if !self.effects.handle_key(&key) {
            self.shell.handle_key(key);
        }
        self.pump_effects();
    }

    pub fn paste(&mut self, text: &str) {
        if !self.effects.is_active() {
            self.shell.paste(text);
        }
    }

    /// Submit a whole line as if typed and entered
    pub fn submit(&mut self, line: &str) {
        self.shell.submit(line);
        self.pump_effects();
    }

    pub fn tick(&mut self, elapsed: Duration) {
        self.effects.tick(elapsed);
        self.shell.tick(elapsed);
        self.pump_effects();
    }

    /// Clipboard writes requested since the last call
    pub fn take_clipboard(&mut self) -> Vec<String> {
        std::mem::take(&mut self.clipboard)
    }

    fn pump_effects(&mut self) {
        for effect in self.shell.drain_effects() {
            if let Some(text) = self.effects.apply(effect) {
                self.clipboard.push(text);
            }
        }
    }

    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.shell.set_screen_size(area.width, area.height);
        render::draw_shell(frame, area, &self.shell, &self.theme);
        self.effects.render(frame, area, &self.theme);
    }
}
