//! Single-line input buffer with a character cursor

/// The line being typed at the prompt
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    text: String,
    /// Cursor position in characters, not bytes
    cursor: usize,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn insert_char(&mut self, ch: char) {
        let offset = self.byte_offset(self.cursor);
        self.text.insert(offset, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        for ch in s.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(ch);
        }
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let offset = self.byte_offset(self.cursor);
        self.text.remove(offset);
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.char_len() {
            let offset = self.byte_offset(self.cursor);
            self.text.remove(offset);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replace the whole line and put the cursor at its end
    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.char_len();
    }

    /// Take the line out, leaving the editor empty
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}

/// Complete `partial` against `names` when exactly one name starts with it
pub fn complete_command<'a>(
    partial: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Option<&'a str> {
    let partial = partial.to_lowercase();
    let mut matches = names.into_iter().filter(|name| name.starts_with(&partial));
    let first = matches.next()?;
    match matches.next() {
        Some(_) => None,
        None => Some(first),
    }
}
