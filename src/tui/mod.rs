//! Terminal User Interface
//!
//! Terminal lifecycle around the app loop: raw mode, alternate screen
//! and bracketed paste are enabled for the duration of the session and
//! restored on the way out, including on error.

pub mod app;
pub mod clipboard;
pub mod events;
pub mod render;
pub mod wizard;
pub mod wizard_render;

pub use app::{App, AppMode};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

/// Run the app against the real terminal
pub async fn run(app: App) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = app.run(&mut terminal).await;

    // Restore the terminal even when the loop errored
    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )
    .ok();
    terminal.show_cursor().ok();

    result
}
