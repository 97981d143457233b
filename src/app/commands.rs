//! The command table
//!
//! A fixed mapping from command name to [`CommandKind`]. Handlers are methods
//! on [`Shell`]; their side effects go through the filesystem, the output
//! stream, the effect queue or a session start, and they report what to print
//! as a [`CommandOutput`].

use std::time::Duration;

use chrono::Local;

use super::Shell;
use crate::model::vfs::{Node, NodeKind};
use crate::session::{ContactSession, NanoSession, PillSession, Session, SnakeSession};
use crate::view::effects::{Effect, SlideItem};
use crate::view::neofetch;

pub const SLIDESHOW_INTERVAL: Duration = Duration::from_millis(3500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Help,
    About,
    Neofetch,
    Date,
    Clear,
    Echo,
    Whoami,
    Pwd,
    Ls,
    Cd,
    Cat,
    Nano,
    Open,
    Welcome,
    Matrix,
    Uptime,
    Contact,
    Snake,
    MeaningOfLife,
    Pills,
    Slideshow,
    FsReset,
}

/// What a command asks the shell to print
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    NoOutput,
    Text(String),
    /// Rendered by a dedicated layout (`neofetch`)
    Structured {
        kind: &'static str,
        payload: serde_json::Value,
    },
}

impl CommandOutput {
    fn text(text: impl Into<String>) -> Self {
        CommandOutput::Text(text.into())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub kind: CommandKind,
    pub summary: &'static str,
    /// Aliases kept for old muscle memory; not listed by `help`
    pub hidden: bool,
}

const fn cmd(name: &'static str, kind: CommandKind, summary: &'static str) -> CommandSpec {
    CommandSpec {
        name,
        kind,
        summary,
        hidden: false,
    }
}

const fn alias(name: &'static str, kind: CommandKind) -> CommandSpec {
    CommandSpec {
        name,
        kind,
        summary: "",
        hidden: true,
    }
}

/// Every command, in `help` order
pub const COMMANDS: &[CommandSpec] = &[
    cmd("help", CommandKind::Help, "Display this help message"),
    cmd("about", CommandKind::About, "Information about this terminal"),
    cmd("neofetch", CommandKind::Neofetch, "Display system information"),
    cmd("date", CommandKind::Date, "Display current date and time"),
    cmd("clear", CommandKind::Clear, "Clear the terminal screen"),
    cmd("echo", CommandKind::Echo, "Echo back the input text"),
    cmd("whoami", CommandKind::Whoami, "Display current user"),
    cmd("pwd", CommandKind::Pwd, "Show current directory"),
    cmd("ls", CommandKind::Ls, "List files"),
    cmd("cd", CommandKind::Cd, "Change directory"),
    cmd("cat", CommandKind::Cat, "Display file contents"),
    cmd("nano", CommandKind::Nano, "Edit/create text file"),
    cmd("open", CommandKind::Open, "Open a picture (overlay)"),
    cmd("welcome", CommandKind::Welcome, "Show the welcome message again"),
    cmd("matrix", CommandKind::Matrix, "Mini matrix effect"),
    cmd("uptime", CommandKind::Uptime, "System uptime"),
    cmd("contact", CommandKind::Contact, "Share your name and number"),
    cmd("snake", CommandKind::Snake, "Play a simple terminal snake"),
    cmd("meaning.of.life.exe", CommandKind::MeaningOfLife, "Choose your destiny"),
    alias("pills", CommandKind::Pills),
    cmd("slideshow.exe", CommandKind::Slideshow, "Family photos slideshow"),
    alias("slideshow", CommandKind::Slideshow),
    cmd("fsreset", CommandKind::FsReset, "Reset virtual filesystem"),
];

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

const ABOUT: &str = "
CRT Terminal Simulator
━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
Written in Rust on top of ratatui
Features authentic CRT flavor:
  • Phosphor green (or amber) palette
  • Block-letter banners
  • Matrix rain
  • A snake that wraps at the edges

Built with nostalgia for the golden age of
computing. Just a terminal, just code.
";

/// Look up a (lowercase) command name
pub fn lookup(name: &str) -> Option<CommandKind> {
    COMMANDS.iter().find(|c| c.name == name).map(|c| c.kind)
}

/// All command names, aliases included (tab completion sees them all)
pub fn names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

pub fn help_text() -> String {
    let mut text = format!("\nAvailable commands:\n{RULE}\n");
    for spec in COMMANDS.iter().filter(|c| !c.hidden) {
        text.push_str(&format!("  {:<10} - {}\n", spec.name, spec.summary));
    }
    text.push_str(RULE);
    text.push('\n');
    text
}

fn family_slides() -> Vec<SlideItem> {
    (0..3)
        .map(|i| SlideItem {
            source: format!("img/family/IMG-20251116-WA000{i}.jpg"),
            caption: format!("Family — November 2025 ({}/3)", i + 1),
        })
        .collect()
}

impl Shell {
    pub(crate) fn run_command(&mut self, kind: CommandKind, args: &[&str]) -> CommandOutput {
        match kind {
            CommandKind::Help => CommandOutput::Text(help_text()),
            CommandKind::About => CommandOutput::text(ABOUT),
            CommandKind::Date => {
                CommandOutput::Text(Local::now().format("%a %b %d %Y %H:%M:%S GMT%z").to_string())
            }
            CommandKind::Clear => {
                self.output.clear();
                CommandOutput::NoOutput
            }
            CommandKind::Echo => CommandOutput::Text(args.join(" ")),
            CommandKind::Whoami => CommandOutput::Text(self.config.user.clone()),
            CommandKind::Pwd => CommandOutput::Text(self.cwd.clone()),
            CommandKind::Ls => self.ls(args.first().copied()),
            CommandKind::Cd => self.cd(args.first().copied().unwrap_or("~")),
            CommandKind::Cat => self.cat(args.first().copied()),
            CommandKind::Nano => match args.first() {
                None => {
                    CommandOutput::text("nano: please specify a filename (e.g., nano notes.txt)")
                }
                Some(target) => {
                    let target = target.to_string();
                    let _ = self.start_session(|cx| NanoSession::start(&target, cx));
                    CommandOutput::NoOutput
                }
            },
            CommandKind::Open => self.open(args.first().copied()),
            CommandKind::Welcome => {
                self.welcome();
                CommandOutput::NoOutput
            }
            CommandKind::Matrix => {
                self.effects.push(Effect::MatrixRain);
                CommandOutput::text("Matrix effect started. Press any key to exit.")
            }
            CommandKind::Uptime => {
                let secs = self.uptime.as_secs();
                CommandOutput::Text(format!(
                    "System uptime: {}h {}m {}s",
                    secs / 3600,
                    (secs % 3600) / 60,
                    secs % 60
                ))
            }
            CommandKind::Neofetch => {
                let info = neofetch::system_info(self.uptime, self.screen);
                match serde_json::to_value(info) {
                    Ok(payload) => CommandOutput::Structured {
                        kind: "neofetch",
                        payload,
                    },
                    Err(e) => {
                        tracing::warn!("Failed to build neofetch payload: {}", e);
                        CommandOutput::NoOutput
                    }
                }
            }
            CommandKind::Contact => {
                let _ = self.start_session(|cx| Some(Session::Contact(ContactSession::start(cx))));
                CommandOutput::NoOutput
            }
            CommandKind::Snake => {
                match self.start_session(|cx| Some(Session::Snake(SnakeSession::start(cx)))) {
                    Ok(()) => CommandOutput::text(
                        "Snake starting… Use arrow keys to move. Press Q to quit.",
                    ),
                    Err(_) => CommandOutput::NoOutput,
                }
            }
            CommandKind::MeaningOfLife | CommandKind::Pills => {
                let dramatic = kind == CommandKind::MeaningOfLife;
                let _ = self
                    .start_session(|cx| Some(Session::Pills(PillSession::start(dramatic, cx))));
                CommandOutput::NoOutput
            }
            CommandKind::Slideshow => {
                self.effects.push(Effect::Slideshow {
                    items: family_slides(),
                    interval: SLIDESHOW_INTERVAL,
                });
                CommandOutput::text(
                    "Starting slideshow… Space: pause/play, ←/→: prev/next, Esc: close",
                )
            }
            CommandKind::FsReset => {
                self.vfs.reset();
                CommandOutput::text("Filesystem reset. Try ls, cd pictures, open ravon-dev.svg")
            }
        }
    }

    fn ls(&self, arg: Option<&str>) -> CommandOutput {
        let shown = arg.unwrap_or(".");
        let path = self.vfs.resolve(shown, &self.cwd);
        match self.vfs.list(&path) {
            Some(entries) => CommandOutput::Text(
                entries
                    .iter()
                    .map(|e| match e.kind {
                        NodeKind::Directory => format!("{}/", e.name),
                        _ => e.name.clone(),
                    })
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            None => CommandOutput::Text(format!("ls: cannot access '{shown}': No such directory")),
        }
    }

    fn cd(&mut self, dest: &str) -> CommandOutput {
        let path = self.vfs.resolve(dest, &self.cwd);
        match self.vfs.get_node(&path) {
            None => CommandOutput::Text(format!("cd: {dest}: No such file or directory")),
            Some(node) if !node.is_dir() => {
                CommandOutput::Text(format!("cd: {dest}: Not a directory"))
            }
            Some(_) => {
                self.cwd = path;
                CommandOutput::NoOutput
            }
        }
    }

    fn cat(&self, file: Option<&str>) -> CommandOutput {
        let Some(file) = file else {
            return CommandOutput::text("cat: missing file operand");
        };
        let path = self.vfs.resolve(file, &self.cwd);
        match self.vfs.get_node(&path) {
            None => CommandOutput::Text(format!("cat: {file}: No such file")),
            Some(Node::TextFile { content }) => CommandOutput::Text(content.clone()),
            Some(_) => CommandOutput::Text(format!("cat: {file}: Not a text file")),
        }
    }

    fn open(&mut self, target: Option<&str>) -> CommandOutput {
        let Some(target) = target else {
            return CommandOutput::text(
                "open: please specify an image path (e.g., open pictures/ravon-dev.svg)",
            );
        };
        let path = self.vfs.resolve(target, &self.cwd);
        match self.vfs.get_node(&path) {
            None => CommandOutput::Text(format!("open: {target}: No such file")),
            Some(Node::Image { source, .. }) => {
                self.effects.push(Effect::ImageOverlay {
                    source: source.clone(),
                });
                CommandOutput::Text(format!("Opening {target}… (press any key to close)"))
            }
            Some(_) => CommandOutput::Text(format!("open: {target}: Not an image file")),
        }
    }
}
