//! watchlens - watch-history statistics viewer
//!
//! Terminal UI for exploring an exported watch history: totals, top
//! channels, monthly trend, day-of-week averages, and hourly distribution,
//! re-derived live as the year range is narrowed.

mod app;
mod ui;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use watchlens_core::{Config, Error, HistorySession};

use crate::app::App;

#[derive(Parser, Debug)]
#[command(name = "watchlens")]
#[command(about = "Explore your watch-history statistics in the terminal")]
#[command(version)]
struct Args {
    /// Path to the exported watch-history.json (falls back to the
    /// `history.path` config entry)
    history: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging (to file, not stdout since we have a TUI)
    let _log_guard =
        watchlens_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!("watchlens TUI starting up");

    let path = args
        .history
        .or(config.history.path)
        .context("no history file given; pass a path or set history.path in the config")?;

    tracing::info!(path = %path.display(), "Loading watch history");

    let session = match HistorySession::load(&path) {
        Ok(session) => session,
        Err(Error::InvalidFormat(reason)) => {
            tracing::warn!(reason = %reason, "rejected history file");
            anyhow::bail!("please provide a valid watch-history file ({reason})");
        }
        Err(Error::NoValidEvents) => {
            anyhow::bail!("no valid videos found in {}", path.display());
        }
        Err(e) => return Err(e).context("failed to load watch history"),
    };

    let mut app = App::new(session);

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor().context("failed to show cursor")?;

    tracing::info!("watchlens TUI shutting down");

    result
}

/// Run the main application loop.
fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
