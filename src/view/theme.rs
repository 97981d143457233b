//! Color schemes
//!
//! Two embedded themes: the green phosphor `crt` and `amber`. Both are pure
//! data and WASM-compatible.

use ratatui::style::{Color, Modifier, Style};

use super::output::LineStyle;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub muted: Color,
    pub error: Color,
    pub success: Color,
    pub info: Color,
    pub question: Color,
    pub red: Color,
    pub blue: Color,
    pub ascii: Color,
    pub link: Color,
    pub prompt: Color,
}

impl Theme {
    pub fn crt() -> Self {
        Self {
            name: "crt",
            bg: Color::Rgb(5, 12, 5),
            fg: Color::Rgb(51, 255, 51),
            accent: Color::Rgb(117, 250, 105),
            muted: Color::Rgb(40, 140, 40),
            error: Color::Rgb(255, 85, 85),
            success: Color::Rgb(120, 255, 160),
            info: Color::Rgb(102, 204, 255),
            question: Color::Rgb(255, 230, 120),
            red: Color::Rgb(255, 60, 60),
            blue: Color::Rgb(80, 140, 255),
            ascii: Color::Rgb(234, 54, 175),
            link: Color::Rgb(102, 204, 255),
            prompt: Color::Rgb(117, 250, 105),
        }
    }

    pub fn amber() -> Self {
        Self {
            name: "amber",
            bg: Color::Rgb(16, 10, 0),
            fg: Color::Rgb(255, 176, 0),
            accent: Color::Rgb(255, 204, 0),
            muted: Color::Rgb(150, 100, 10),
            error: Color::Rgb(255, 90, 60),
            success: Color::Rgb(255, 220, 120),
            info: Color::Rgb(255, 190, 80),
            question: Color::Rgb(255, 240, 170),
            red: Color::Rgb(255, 60, 60),
            blue: Color::Rgb(80, 140, 255),
            ascii: Color::Rgb(255, 150, 0),
            link: Color::Rgb(255, 220, 150),
            prompt: Color::Rgb(255, 204, 0),
        }
    }

    /// Look a theme up by name, falling back to `crt`
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "amber" => Self::amber(),
            "crt" | "green" => Self::crt(),
            other => {
                tracing::warn!("Unknown theme '{}', using crt", other);
                Self::crt()
            }
        }
    }

    pub fn available_themes() -> Vec<String> {
        vec!["crt".to_string(), "amber".to_string()]
    }

    pub fn style_for(&self, line_style: LineStyle) -> Style {
        let base = Style::default();
        match line_style {
            LineStyle::Normal => base.fg(self.fg),
            LineStyle::Command => base.fg(self.prompt),
            LineStyle::Error => base.fg(self.error),
            LineStyle::Info => base.fg(self.info),
            LineStyle::Success => base.fg(self.success),
            LineStyle::Muted => base.fg(self.muted),
            LineStyle::Question => base.fg(self.question).add_modifier(Modifier::BOLD),
            LineStyle::Welcome => base.fg(self.accent).add_modifier(Modifier::BOLD),
            LineStyle::Divider => base.fg(self.muted),
            LineStyle::Red => base.fg(self.red).add_modifier(Modifier::BOLD),
            LineStyle::Blue => base.fg(self.blue).add_modifier(Modifier::BOLD),
            LineStyle::Ascii => base.fg(self.ascii),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::crt()
    }
}
