//! Visual effects layered over the terminal
//!
//! The shell only ever requests effects (fire-and-forget) by queueing an
//! [`Effect`]. The front end drains the queue into an [`EffectLayer`], which
//! owns the running overlay, advances it on every tick and gets first pick of
//! key events while an overlay is shown.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use serde::{Deserialize, Serialize};

use super::theme::Theme;
use crate::input::{KeyCode, KeyEvent};

pub const MATRIX_DURATION: Duration = Duration::from_secs(10);
const MATRIX_FRAME: Duration = Duration::from_millis(33);
const MATRIX_COLUMNS: usize = 256;
const MATRIX_GLYPHS: &[char] = &[
    'ｱ', 'ｲ', 'ｳ', 'ｴ', 'ｵ', 'ｶ', 'ｷ', 'ｸ', 'ｹ', 'ｺ', 'ｻ', 'ｼ', 'ｽ', 'ｾ', 'ｿ', 'ﾀ', 'ﾁ', 'ﾂ',
    'ﾃ', 'ﾄ', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'Z', ':', '=', '*', '+', '<',
];

/// One picture of a slideshow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideItem {
    pub source: String,
    pub caption: String,
}

/// A request from the shell to the presentation layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "kebab-case")]
pub enum Effect {
    MatrixRain,
    ImageOverlay {
        source: String,
    },
    Slideshow {
        items: Vec<SlideItem>,
        #[serde(with = "millis")]
        interval: Duration,
    },
    /// Best-effort clipboard write; failures are ignored
    CopyToClipboard(String),
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[derive(Debug)]
pub struct MatrixRain {
    elapsed: Duration,
    since_frame: Duration,
    /// Row of the leading glyph per column (negative: not yet on screen)
    drops: Vec<i32>,
    glyphs: Vec<char>,
    rng: StdRng,
}

impl MatrixRain {
    fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let drops = (0..MATRIX_COLUMNS).map(|_| -rng.gen_range(0..40)).collect();
        let glyphs = (0..MATRIX_COLUMNS)
            .map(|_| MATRIX_GLYPHS[rng.gen_range(0..MATRIX_GLYPHS.len())])
            .collect();
        Self {
            elapsed: Duration::ZERO,
            since_frame: Duration::ZERO,
            drops,
            glyphs,
            rng,
        }
    }

    fn step(&mut self, height: i32) {
        for (drop, glyph) in self.drops.iter_mut().zip(self.glyphs.iter_mut()) {
            *glyph = MATRIX_GLYPHS[self.rng.gen_range(0..MATRIX_GLYPHS.len())];
            if *drop > height && self.rng.gen_bool(0.025) {
                *drop = 0;
            }
            *drop += 1;
        }
    }

    /// Returns false once the rain has run its course
    fn tick(&mut self, elapsed: Duration) -> bool {
        self.elapsed += elapsed;
        self.since_frame += elapsed;
        while self.since_frame >= MATRIX_FRAME {
            self.since_frame -= MATRIX_FRAME;
            self.step(60);
        }
        self.elapsed < MATRIX_DURATION
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slideshow {
    items: Vec<SlideItem>,
    index: usize,
    paused: bool,
    interval: Duration,
    since_advance: Duration,
}

impl Slideshow {
    pub fn current(&self) -> Option<&SlideItem> {
        self.items.get(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn next(&mut self) {
        if !self.items.is_empty() {
            self.index = (self.index + 1) % self.items.len();
        }
        self.since_advance = Duration::ZERO;
    }

    fn prev(&mut self) {
        if !self.items.is_empty() {
            self.index = (self.index + self.items.len() - 1) % self.items.len();
        }
        self.since_advance = Duration::ZERO;
    }

    fn tick(&mut self, elapsed: Duration) {
        if self.paused || self.interval.is_zero() {
            return;
        }
        self.since_advance += elapsed;
        while self.since_advance >= self.interval {
            self.since_advance -= self.interval;
            if !self.items.is_empty() {
                self.index = (self.index + 1) % self.items.len();
            }
        }
    }
}

/// The overlay currently drawn over the terminal
#[derive(Debug)]
pub enum Overlay {
    Matrix(MatrixRain),
    Image { source: String },
    Slideshow(Slideshow),
}

/// Host for running overlays
#[derive(Debug, Default)]
pub struct EffectLayer {
    overlay: Option<Overlay>,
    seed: u64,
}

impl EffectLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the effect described by `effect`
    ///
    /// A new overlay replaces the current one. Clipboard requests are not
    /// overlays and are handed back to the caller.
    pub fn apply(&mut self, effect: Effect) -> Option<String> {
        match effect {
            Effect::MatrixRain => {
                self.seed = self.seed.wrapping_add(1);
                self.overlay = Some(Overlay::Matrix(MatrixRain::new(self.seed)));
                tracing::debug!("Matrix rain started");
            }
            Effect::ImageOverlay { source } => {
                tracing::debug!("Opening image overlay for {}", source);
                self.overlay = Some(Overlay::Image { source });
            }
            Effect::Slideshow { items, interval } => {
                self.overlay = Some(Overlay::Slideshow(Slideshow {
                    items,
                    index: 0,
                    paused: false,
                    interval,
                    since_advance: Duration::ZERO,
                }));
            }
            Effect::CopyToClipboard(text) => return Some(text),
        }
        None
    }

    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn tick(&mut self, elapsed: Duration) {
        let finished = match &mut self.overlay {
            Some(Overlay::Matrix(rain)) => !rain.tick(elapsed),
            Some(Overlay::Slideshow(show)) => {
                show.tick(elapsed);
                false
            }
            _ => false,
        };
        if finished {
            tracing::debug!("Matrix rain finished");
            self.overlay = None;
        }
    }

    /// Offer a key to the overlay; returns true when it was consumed
    pub fn handle_key(&mut self, key: &KeyEvent) -> bool {
        let close = match &mut self.overlay {
            None => return false,
            Some(Overlay::Matrix(_)) | Some(Overlay::Image { .. }) => true,
            Some(Overlay::Slideshow(show)) => match key.code {
                KeyCode::Esc => true,
                KeyCode::Char(' ') => {
                    show.paused = !show.paused;
                    false
                }
                KeyCode::Left => {
                    show.prev();
                    false
                }
                KeyCode::Right => {
                    show.next();
                    false
                }
                _ => false,
            },
        };
        if close {
            self.overlay = None;
        }
        true
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match &self.overlay {
            None => {}
            Some(Overlay::Matrix(rain)) => render_matrix(frame, area, rain, theme),
            Some(Overlay::Image { source }) => render_picture(
                frame,
                area,
                theme,
                source,
                None,
                "press any key to close",
            ),
            Some(Overlay::Slideshow(show)) => {
                let Some(item) = show.current() else {
                    return;
                };
                let counter = format!("{}/{}", show.index + 1, show.items.len());
                let status = if show.paused { "paused" } else { "playing" };
                let footer = format!(
                    "{counter} · {status} · Space: pause/play  ←/→: prev/next  Esc: close"
                );
                render_picture(frame, area, theme, &item.source, Some(&item.caption), &footer);
            }
        }
    }
}

fn render_matrix(frame: &mut Frame, area: Rect, rain: &MatrixRain, theme: &Theme) {
    frame.render_widget(Clear, area);
    let height = area.height as i32;
    let lines: Vec<Line> = (0..height)
        .map(|row| {
            let spans: Vec<Span> = (0..area.width as usize)
                .map(|col| {
                    let head = rain.drops.get(col).copied().unwrap_or(-1);
                    let glyph = rain.glyphs.get(col).copied().unwrap_or(' ');
                    if row == head {
                        Span::styled(glyph.to_string(), Style::default().fg(theme.fg).add_modifier(Modifier::BOLD))
                    } else if row < head && head - row < 8 {
                        Span::styled(glyph.to_string(), Style::default().fg(theme.muted))
                    } else {
                        Span::raw(" ")
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(
        Paragraph::new(lines).style(Style::default().bg(theme.bg)),
        area,
    );
}

fn render_picture(
    frame: &mut Frame,
    area: Rect,
    theme: &Theme,
    source: &str,
    caption: Option<&str>,
    footer: &str,
) {
    let width = area.width.saturating_sub(8).max(20).min(area.width);
    let height = 9.min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("[ {source} ]"),
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
        )),
    ];
    if let Some(caption) = caption {
        lines.push(Line::from(Span::styled(caption.to_string(), Style::default().fg(theme.fg))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(footer.to_string(), Style::default().fg(theme.muted))));

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.accent)),
            )
            .style(Style::default().bg(theme.bg)),
        popup,
    );
}
