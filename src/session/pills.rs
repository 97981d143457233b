//! Red pill / blue pill

use std::time::Duration;

use super::{SessionCx, SessionStatus};
use crate::input::{KeyCode, KeyEvent};
use crate::view::effects::Effect;
use crate::view::output::{EntryId, LineStyle};

const RED_FRAME: Duration = Duration::from_millis(220);
const RED_DEEPER_FOR: Duration = Duration::from_millis(1200);
const RED_REVEAL_AFTER: Duration = Duration::from_millis(1800);
const BLUE_FRAME: Duration = Duration::from_millis(140);
const BLUE_LAST_FRAME: u32 = 18;

const RED_PILL: &str = "      █████████\n    ████  RED ████\n      █████████";
const BLUE_PILL: &str = "      █████████\n    ███ BLUE ███\n      █████████";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Red,
    Blue,
}

impl Choice {
    /// `red…` / `blue…`, case-insensitive
    pub fn parse(input: &str) -> Option<Self> {
        let choice = input.trim().to_lowercase();
        if choice.starts_with('r') {
            Some(Choice::Red)
        } else if choice.starts_with('b') {
            Some(Choice::Blue)
        } else {
            None
        }
    }
}

#[derive(Debug)]
enum Phase {
    Choosing,
    Red {
        status: EntryId,
        elapsed: Duration,
        since_frame: Duration,
        dots: usize,
        traced: bool,
    },
    Blue {
        z: EntryId,
        since_frame: Duration,
        count: u32,
    },
}

#[derive(Debug)]
pub struct PillSession {
    phase: Phase,
}

impl PillSession {
    /// `dramatic` selects the longer intro used by `meaning.of.life.exe`
    pub fn start(dramatic: bool, cx: &mut SessionCx) -> Self {
        let out = &mut *cx.output;
        if dramatic {
            out.append_line("Accessing meaning.of.life.exe…", LineStyle::Muted);
            out.append_line("Loading Oracle.dll……", LineStyle::Muted);
            out.append_line("Decrypting fate matrices…", LineStyle::Muted);
        } else {
            out.append_line("Wake up, Neo…", LineStyle::Muted);
            out.append_line("Follow the white rabbit.", LineStyle::Muted);
        }
        out.append_line(" ", LineStyle::Normal);
        out.append_columns(vec![
            (RED_PILL.to_string(), LineStyle::Red),
            (BLUE_PILL.to_string(), LineStyle::Blue),
        ]);
        out.append_line("Choose your path: [red] or [blue]", LineStyle::Question);
        out.append_line("Type red or blue and press Enter.", LineStyle::Muted);
        Self {
            phase: Phase::Choosing,
        }
    }

    pub fn is_choosing(&self) -> bool {
        matches!(self.phase, Phase::Choosing)
    }

    pub fn submit(&mut self, line: &str, cx: &mut SessionCx) -> SessionStatus {
        if !self.is_choosing() {
            return SessionStatus::Continue;
        }
        if line.trim().is_empty() {
            cx.output.append_line("Say red or blue.", LineStyle::Error);
            return SessionStatus::Continue;
        }
        match Choice::parse(line) {
            Some(Choice::Red) => {
                cx.output.append_line("You take the RED pill…", LineStyle::Red);
                let status = cx
                    .output
                    .append_line("Deeper. Deeper.. Deeper...", LineStyle::Muted);
                self.phase = Phase::Red {
                    status,
                    elapsed: Duration::ZERO,
                    since_frame: Duration::ZERO,
                    dots: 0,
                    traced: false,
                };
            }
            Some(Choice::Blue) => {
                cx.output.append_line("You take the BLUE pill…", LineStyle::Blue);
                cx.output.append_line(
                    "The story ends. You wake up in your bed…",
                    LineStyle::Muted,
                );
                let z = cx.output.append_line("Z", LineStyle::Muted);
                self.phase = Phase::Blue {
                    z,
                    since_frame: Duration::ZERO,
                    count: 0,
                };
            }
            None => {
                cx.output
                    .append_line("Only two choices: red or blue.", LineStyle::Error);
            }
        }
        SessionStatus::Continue
    }

    /// Esc walks away while the choice is still open
    pub fn handle_key(&mut self, key: &KeyEvent, cx: &mut SessionCx) -> Option<SessionStatus> {
        if key.code != KeyCode::Esc || !self.is_choosing() {
            return None;
        }
        cx.output
            .append_line("You walk away. The pills remain.", LineStyle::Muted);
        Some(finish(cx))
    }

    pub fn tick(&mut self, elapsed_now: Duration, cx: &mut SessionCx) -> SessionStatus {
        match &mut self.phase {
            Phase::Choosing => SessionStatus::Continue,
            Phase::Red {
                status,
                elapsed,
                since_frame,
                dots,
                traced,
            } => {
                *elapsed += elapsed_now;
                if !*traced {
                    if *elapsed < RED_DEEPER_FOR {
                        *since_frame += elapsed_now;
                        while *since_frame >= RED_FRAME {
                            *since_frame -= RED_FRAME;
                            *dots = (*dots + 1) % 4;
                        }
                        cx.output.update(
                            *status,
                            format!("Deeper{}", ".".repeat(*dots)),
                            LineStyle::Muted,
                        );
                        return SessionStatus::Continue;
                    }
                    *traced = true;
                    cx.output.update(*status, "Tracing reality…", LineStyle::Muted);
                    cx.effects.push(Effect::MatrixRain);
                }
                if *elapsed < RED_DEEPER_FOR + RED_REVEAL_AFTER {
                    return SessionStatus::Continue;
                }
                cx.output
                    .append_line("Welcome to the desert of the real.", LineStyle::Info);
                cx.output.append_line(
                    "The choice is made. Nothing will ever be the same.",
                    LineStyle::Muted,
                );
                finish(cx)
            }
            Phase::Blue {
                z,
                since_frame,
                count,
            } => {
                *since_frame += elapsed_now;
                while *since_frame >= BLUE_FRAME {
                    *since_frame -= BLUE_FRAME;
                    *count += 1;
                    cx.output.update(
                        *z,
                        format!("Z{}", "z".repeat((*count % 6) as usize)),
                        LineStyle::Muted,
                    );
                    if *count > BLUE_LAST_FRAME {
                        cx.output.append_line(
                            "…and believe whatever you want to believe.",
                            LineStyle::Info,
                        );
                        return finish(cx);
                    }
                }
                SessionStatus::Continue
            }
        }
    }
}

fn finish(cx: &mut SessionCx) -> SessionStatus {
    cx.output
        .append_line("Tip: try snake, neofetch, or matrix.", LineStyle::Muted);
    SessionStatus::Finished
}
