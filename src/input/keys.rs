//! Backend-neutral key events
//!
//! The shell core never sees crossterm or DOM events directly. The native
//! runtime converts crossterm events and the browser build converts DOM key
//! names into these types.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Char(char),
    Enter,
    Tab,
    Backspace,
    Delete,
    Esc,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyModifiers: u8 {
        const NONE = 0b0000_0000;
        const SHIFT = 0b0000_0001;
        const CONTROL = 0b0000_0010;
        const ALT = 0b0000_0100;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyEvent {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Whether this is Ctrl+`c` (case-insensitive)
    pub fn is_ctrl(&self, c: char) -> bool {
        self.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(self.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::plain(code)
    }
}

/// Map a browser `KeyboardEvent.key` name
pub fn from_dom_key(key: &str, ctrl: bool, alt: bool, shift: bool) -> Option<KeyEvent> {
    let code = match key {
        "Enter" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        "Delete" => KeyCode::Delete,
        "Escape" | "Esc" => KeyCode::Esc,
        "ArrowUp" => KeyCode::Up,
        "ArrowDown" => KeyCode::Down,
        "ArrowLeft" => KeyCode::Left,
        "ArrowRight" => KeyCode::Right,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        " " | "Spacebar" => KeyCode::Char(' '),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => return None,
            }
        }
    };
    let mut modifiers = KeyModifiers::NONE;
    modifiers.set(KeyModifiers::CONTROL, ctrl);
    modifiers.set(KeyModifiers::ALT, alt);
    modifiers.set(KeyModifiers::SHIFT, shift);
    Some(KeyEvent::new(code, modifiers))
}

#[cfg(feature = "runtime")]
impl TryFrom<&crossterm::event::KeyEvent> for KeyEvent {
    type Error = ();

    fn try_from(event: &crossterm::event::KeyEvent) -> Result<Self, Self::Error> {
        use crossterm::event::{KeyCode as CtCode, KeyModifiers as CtMods};

        let code = match event.code {
            CtCode::Char(c) => KeyCode::Char(c),
            CtCode::Enter => KeyCode::Enter,
            CtCode::Tab => KeyCode::Tab,
            CtCode::Backspace => KeyCode::Backspace,
            CtCode::Delete => KeyCode::Delete,
            CtCode::Esc => KeyCode::Esc,
            CtCode::Up => KeyCode::Up,
            CtCode::Down => KeyCode::Down,
            CtCode::Left => KeyCode::Left,
            CtCode::Right => KeyCode::Right,
            CtCode::Home => KeyCode::Home,
            CtCode::End => KeyCode::End,
            _ => return Err(()),
        };
        let mut modifiers = KeyModifiers::NONE;
        modifiers.set(KeyModifiers::SHIFT, event.modifiers.contains(CtMods::SHIFT));
        modifiers.set(KeyModifiers::CONTROL, event.modifiers.contains(CtMods::CONTROL));
        modifiers.set(KeyModifiers::ALT, event.modifiers.contains(CtMods::ALT));
        Ok(KeyEvent::new(code, modifiers))
    }
}
