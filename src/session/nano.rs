//! Line-based nano
//!
//! Every submitted line is appended to the buffer; there is no in-place
//! editing. A line whose trimmed text is exactly one of the control tokens
//! saves or aborts instead. To insert a token as text, prefix it with a
//! backslash (`\:wq` inserts `:wq`). Ctrl+X and Esc arrive as key signals
//! and never reach the buffer.

use super::{Session, SessionCx, SessionStatus};
use crate::input::{KeyCode, KeyEvent};
use crate::model::vfs::Node;
use crate::view::output::LineStyle;

const SAVE_TOKENS: &[&str] = &[":wq", ":x", "save", "write", "exit"];
const ABORT_TOKENS: &[&str] = &[":q", ":q!", "quit", "abort"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    Save,
    Abort,
}

fn control_token(trimmed: &str) -> Option<Control> {
    if SAVE_TOKENS.contains(&trimmed) {
        Some(Control::Save)
    } else if ABORT_TOKENS.contains(&trimmed) {
        Some(Control::Abort)
    } else {
        None
    }
}

#[derive(Debug)]
pub struct NanoSession {
    path: String,
    buffer: Vec<String>,
}

impl NanoSession {
    /// Open `target` for editing, or print why it cannot be
    pub fn start(target: &str, cx: &mut SessionCx) -> Option<Session> {
        let path = cx.vfs.resolve(target, cx.cwd);
        let existing = match cx.vfs.get_node(&path) {
            Some(Node::Directory { .. }) => {
                cx.output
                    .append_line(format!("nano: {target}: Is a directory"), LineStyle::Error);
                return None;
            }
            Some(Node::TextFile { content }) => content.clone(),
            _ => String::new(),
        };

        let out = &mut *cx.output;
        out.append_line(format!("nano {target}"), LineStyle::Welcome);
        out.append_line(
            "Editing. Type text and press Enter for new lines.",
            LineStyle::Muted,
        );
        out.append_line(
            "Commands: Ctrl+X to save & quit, Esc to abort, or :wq / :x / :q / :q!",
            LineStyle::Muted,
        );
        if !existing.is_empty() {
            out.append_line("--- current content ---", LineStyle::Muted);
            out.append_text(&existing, LineStyle::Normal);
            out.append_line("--- end current content ---", LineStyle::Muted);
        }

        tracing::debug!("nano editing {}", path);
        Some(Session::Nano(NanoSession {
            path,
            buffer: Vec::new(),
        }))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn buffer(&self) -> &[String] {
        &self.buffer
    }

    pub fn submit(&mut self, line: &str, cx: &mut SessionCx) -> SessionStatus {
        let trimmed = line.trim();
        if let Some(control) = control_token(trimmed) {
            return self.finish(control, cx);
        }

        let text = match trimmed.strip_prefix('\\') {
            Some(rest) if control_token(rest).is_some() => rest.to_string(),
            _ => line.to_string(),
        };
        self.commit(text, cx);
        SessionStatus::Continue
    }

    fn commit(&mut self, text: String, cx: &mut SessionCx) {
        cx.output.append_line(format!("│ {text}"), LineStyle::Muted);
        self.buffer.push(text);
    }

    /// Ctrl+X saves, keeping the line still being typed. Esc drops it.
    pub fn handle_key(&mut self, key: &KeyEvent, cx: &mut SessionCx) -> Option<SessionStatus> {
        if key.is_ctrl('x') {
            if !cx.pending.is_empty() {
                self.commit(cx.pending.to_string(), cx);
            }
            Some(self.finish(Control::Save, cx))
        } else if key.code == KeyCode::Esc {
            Some(self.finish(Control::Abort, cx))
        } else {
            None
        }
    }

    fn finish(&mut self, control: Control, cx: &mut SessionCx) -> SessionStatus {
        match control {
            Control::Save => match cx.vfs.write_text_file(&self.path, &self.buffer.join("\n")) {
                Ok(()) => {
                    cx.output.append_line("Saved.", LineStyle::Success);
                }
                Err(e) => {
                    cx.output.append_line(format!("nano: {e}"), LineStyle::Error);
                }
            },
            Control::Abort => {
                cx.output.append_line("Aborted.", LineStyle::Error);
            }
        }
        SessionStatus::Finished
    }
}
