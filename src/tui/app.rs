//! TUI Application State
//!
//! Top-level state for the terminal interface: the landing menu and the
//! report wizard it hosts. All mutation happens synchronously inside
//! event handling; there is exactly one logical writer.

use super::clipboard;
use super::events::{EventHandler, TuiEvent, keys};
use super::render;
use super::wizard::{ReportWizard, WizardAction};
use crate::config::Config;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::Terminal;
use ratatui::backend::Backend;

/// Landing menu entries
pub const MENU_ITEMS: [&str; 2] = ["Report an Incident", "Quit"];

/// Application mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Landing menu
    Menu,
    /// Report wizard
    Wizard,
}

/// Top-level application state
pub struct App {
    pub mode: AppMode,
    pub menu_selected: usize,
    pub wizard: Option<ReportWizard>,
    pub should_quit: bool,
    config: Config,
    event_handler: EventHandler,
}

impl App {
    /// `with_menu` controls whether the wizard is hosted by the landing
    /// menu (wizard exits return here) or runs standalone (wizard exits
    /// fall back to internal resets).
    pub fn new(config: Config, with_menu: bool) -> Self {
        let (mode, wizard) = if with_menu {
            (AppMode::Menu, None)
        } else {
            (
                AppMode::Wizard,
                Some(ReportWizard::new(false).with_form_defaults(&config.form)),
            )
        };
        Self {
            mode,
            menu_selected: 0,
            wizard,
            should_quit: false,
            config,
            event_handler: EventHandler::new(),
        }
    }

    /// Main event loop: draw, wait for the next event, mutate
    pub async fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()>
    where
        <B as Backend>::Error: std::error::Error + Send + Sync + 'static,
    {
        let tx = self.event_handler.sender();
        EventHandler::start_terminal_listener(tx);

        while !self.should_quit {
            terminal.draw(|f| render::render(f, &self))?;
            let event = self.event_handler.next().await;
            match event {
                Some(TuiEvent::Key(key)) => self.handle_key(key),
                Some(TuiEvent::Paste(text)) => self.handle_paste(&text),
                Some(TuiEvent::Resize(..)) | Some(TuiEvent::Tick) => {}
                None => break,
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if keys::is_quit(&key) {
            self.should_quit = true;
            return;
        }
        match self.mode {
            AppMode::Menu => self.handle_menu_key(key),
            AppMode::Wizard => self.handle_wizard_key(key),
        }
    }

    fn handle_menu_key(&mut self, key: KeyEvent) {
        use crossterm::event::KeyCode;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_selected = self.menu_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_selected = (self.menu_selected + 1).min(MENU_ITEMS.len() - 1);
            }
            KeyCode::Enter => {
                if self.menu_selected == 0 {
                    self.start_wizard();
                } else {
                    self.should_quit = true;
                }
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            _ => {}
        }
    }

    fn start_wizard(&mut self) {
        self.wizard = Some(ReportWizard::new(true).with_form_defaults(&self.config.form));
        self.mode = AppMode::Wizard;
    }

    fn handle_wizard_key(&mut self, key: KeyEvent) {
        let Some(wizard) = &mut self.wizard else {
            return;
        };
        match wizard.handle_key(key) {
            WizardAction::None => {}
            WizardAction::ReturnToHost => {
                self.wizard = None;
                self.mode = AppMode::Menu;
            }
            WizardAction::CopyToClipboard(text) => {
                if let Err(e) = clipboard::copy(&text) {
                    tracing::warn!("clipboard copy failed: {e}");
                }
            }
        }
    }

    fn handle_paste(&mut self, text: &str) {
        if self.mode == AppMode::Wizard
            && let Some(wizard) = &mut self.wizard
        {
            wizard.handle_paste(text);
        }
    }
}
