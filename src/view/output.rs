//! Output stream
//!
//! The scrollback the shell writes into. The core only ever appends entries or
//! updates an entry it appended earlier (spinners, the snake board, the score);
//! how entries are drawn is up to the renderer.
//!
//! The buffer is bounded: once it holds more than its limit, the oldest entries
//! are dropped. Handles to dropped entries simply stop resolving.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::neofetch::NeofetchInfo;

/// Visual class of an output line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    #[default]
    Normal,
    /// An echoed command line (prompt + input)
    Command,
    Error,
    Info,
    Success,
    Muted,
    Question,
    Welcome,
    Divider,
    Red,
    Blue,
    /// Block/box-drawing art
    Ascii,
}

/// Characters that mark a line as ASCII art when they lead it
const ASCII_ART_LEADERS: &[char] = &[
    '▄', '█', '▀', '╔', '╗', '╚', '╝', '╦', '╩', '╬', '╠', '╣', '╤', '╧', '╪', '╫', '╟', '╢',
    '╥', '╨', '╒', '╕', '╘', '╛', '╞', '╡', '╖', '╓', '╙', '╳', '╱', '╲', '┌', '┐', '└', '┘',
    '┼', '├', '┤', '┬', '┴', '─', '│', '╭', '╮', '╯', '╰', '░', '▒', '▓', '═', '▁', '▂', '▃',
    '▅', '▆', '▇',
];

/// Whether a line looks like ASCII art (leading block or box-drawing glyph)
pub fn looks_like_ascii_art(line: &str) -> bool {
    line.trim()
        .chars()
        .next()
        .is_some_and(|c| ASCII_ART_LEADERS.contains(&c))
}

/// Stable handle to an appended entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub u64);

/// Content of an output entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum EntryContent {
    /// A single line of text
    Line { text: String, style: LineStyle },
    /// Preformatted multi-line text kept together (boards, art)
    Block { text: String, style: LineStyle },
    /// Side-by-side blocks (the two pills)
    Columns { blocks: Vec<(String, LineStyle)> },
    /// System information layout
    Neofetch(NeofetchInfo),
}

/// An entry of the output stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEntry {
    pub id: EntryId,
    #[serde(flatten)]
    pub content: EntryContent,
}

/// Bounded scrollback
#[derive(Debug, Clone)]
pub struct Output {
    entries: VecDeque<OutputEntry>,
    limit: usize,
    next_id: u64,
}

impl Output {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            limit: limit.max(1),
            next_id: 0,
        }
    }

    fn push(&mut self, content: EntryContent) -> EntryId {
        let id = EntryId(self.next_id);
        self.next_id += 1;
        self.entries.push_back(OutputEntry { id, content });
        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
            tracing::trace!("Dropped {} old output entries", excess);
        }
        id
    }

    /// Append a single line
    pub fn append_line(&mut self, text: impl Into<String>, style: LineStyle) -> EntryId {
        self.push(EntryContent::Line {
            text: text.into(),
            style,
        })
    }

    /// Append text split into one entry per line; art-looking lines get the ascii style
    pub fn append_text(&mut self, text: &str, style: LineStyle) {
        for line in text.split('\n') {
            let line_style = if looks_like_ascii_art(line) {
                LineStyle::Ascii
            } else {
                style
            };
            self.append_line(line, line_style);
        }
    }

    /// Append a preformatted block kept as one entry
    pub fn append_block(&mut self, text: impl Into<String>, style: LineStyle) -> EntryId {
        self.push(EntryContent::Block {
            text: text.into(),
            style,
        })
    }

    pub fn append_columns(&mut self, blocks: Vec<(String, LineStyle)>) -> EntryId {
        self.push(EntryContent::Columns { blocks })
    }

    /// Append a structured payload rendered by a dedicated layout
    ///
    /// Unknown kinds and malformed payloads are dropped with a warning.
    pub fn append_structured(&mut self, kind: &str, payload: serde_json::Value) -> Option<EntryId> {
        match kind {
            "neofetch" => match serde_json::from_value::<NeofetchInfo>(payload) {
                Ok(info) => Some(self.push(EntryContent::Neofetch(info))),
                Err(e) => {
                    tracing::warn!("Invalid neofetch payload: {}", e);
                    None
                }
            },
            other => {
                tracing::warn!("No renderer found for structured output kind: {}", other);
                None
            }
        }
    }

    /// Replace the text (and style) of an earlier line or block
    ///
    /// Returns false when the entry no longer exists.
    pub fn update(&mut self, id: EntryId, new_text: impl Into<String>, new_style: LineStyle) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        match &mut entry.content {
            EntryContent::Line { text, style } | EntryContent::Block { text, style } => {
                *text = new_text.into();
                *style = new_style;
                true
            }
            _ => false,
        }
    }

    pub fn get(&self, id: EntryId) -> Option<&OutputEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> impl DoubleEndedIterator<Item = &OutputEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Plain text of every entry, one string per rendered line (used by tests and logs)
    pub fn plain_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for entry in &self.entries {
            match &entry.content {
                EntryContent::Line { text, .. } => lines.push(text.clone()),
                EntryContent::Block { text, .. } => lines.extend(text.split('\n').map(String::from)),
                EntryContent::Columns { blocks } => {
                    for (text, _) in blocks {
                        lines.extend(text.split('\n').map(String::from));
                    }
                }
                EntryContent::Neofetch(info) => {
                    lines.push(info.header.clone());
                    lines.extend(info.info.iter().map(|item| format!("{}: {}", item.label, item.value)));
                }
            }
        }
        lines
    }

    /// Whether any line contains `needle`
    pub fn contains(&self, needle: &str) -> bool {
        self.plain_lines().iter().any(|line| line.contains(needle))
    }
}
