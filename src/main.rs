use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use tracing_subscriber::EnvFilter;

use crt_terminal::app::{Console, Shell};
use crt_terminal::config::Config;
use crt_terminal::input::KeyEvent;
use crt_terminal::model::storage::{shared, FileStorage, MemoryStorage, StorageHandle};

const FRAME: Duration = Duration::from_millis(33);

/// A CRT-styled novelty terminal
#[derive(Parser, Debug)]
#[command(name = "crt", version, about)]
struct Args {
    /// Path to the JSON config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Directory holding the persisted filesystem and contacts log
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Log file (the terminal itself owns stdout)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Reset the virtual filesystem to its defaults before starting
    #[arg(long)]
    fs_reset: bool,

    /// Skip the welcome banner
    #[arg(long)]
    no_welcome: bool,
}

fn init_logging(path: Option<PathBuf>) -> Result<()> {
    let Some(path) = path.or_else(|| dirs::data_dir().map(|d| d.join("crt-terminal").join("crt.log")))
    else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("crt_terminal=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn copy_to_clipboard(text: &str) {
    match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text.to_string())) {
        Ok(()) => tracing::debug!("Copied {} bytes to the clipboard", text.len()),
        Err(e) => tracing::debug!("Clipboard unavailable: {}", e),
    }
}

/// File storage in `data_dir` (or the platform data dir), else memory
fn open_storage(data_dir: Option<PathBuf>) -> StorageHandle {
    let storage = match data_dir.map(FileStorage::new) {
        Some(storage) => Ok(storage),
        None => FileStorage::in_data_dir(),
    };
    match storage {
        Ok(storage) => {
            tracing::info!("Using data directory {}", storage.dir().display());
            shared(storage)
        }
        Err(e) => {
            tracing::warn!("{}, keeping state in memory", e);
            shared(MemoryStorage::new())
        }
    }
}

fn run(terminal: &mut DefaultTerminal, console: &mut Console) -> Result<()> {
    let mut last = Instant::now();
    loop {
        terminal.draw(|frame| console.render(frame))?;

        if event::poll(FRAME)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if key.code == event::KeyCode::Char('c')
                        && key.modifiers.contains(event::KeyModifiers::CONTROL)
                    {
                        tracing::info!("Ctrl+C, exiting");
                        return Ok(());
                    }
                    if let Ok(key) = KeyEvent::try_from(&key) {
                        console.handle_key(key);
                    }
                }
                Event::Paste(text) => console.paste(&text),
                _ => {}
            }
        }

        let now = Instant::now();
        console.tick(now - last);
        last = now;

        for text in console.take_clipboard() {
            copy_to_clipboard(&text);
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.clone())?;

    let config = match args.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load_from_file(&path)?,
        None => Config::default(),
    };
    let storage = open_storage(args.data_dir.clone());
    let mut shell = Shell::new(config, storage, rand::random());
    if args.fs_reset {
        shell.vfs_mut().reset();
    }
    if !args.no_welcome {
        shell.welcome();
    }
    let mut console = Console::new(shell);

    let mut terminal = ratatui::init();
    let result = crossterm::execute!(std::io::stdout(), EnableBracketedPaste)
        .context("Failed to enable bracketed paste")
        .and_then(|()| run(&mut terminal, &mut console));
    let _ = crossterm::execute!(std::io::stdout(), DisableBracketedPaste);
    ratatui::restore();
    result
}
