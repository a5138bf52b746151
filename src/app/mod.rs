//! Application runtime: terminal setup, event loop and service dispatch

pub mod input;
pub mod state;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use once_cell::sync::Lazy;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::library::Catalog;
use crate::locale::UiLanguage;
use crate::romanize::HANZI;
use crate::services::{ServiceEvent, ServiceRunner};
use crate::theme::Theme;
use crate::ui;
use state::{AppState, Effect};

/// How long to wait for a key before checking service results
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// The main application
pub struct App {
    /// Application configuration
    config: Config,

    /// Theme resolved from the configuration
    theme: Theme,

    /// Current application state
    state: AppState,

    /// Runs translation, speech and browser requests
    services: ServiceRunner,

    /// Results of finished service requests
    events: mpsc::UnboundedReceiver<ServiceEvent>,

    /// Terminal backend
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl App {
    /// Scan the library and set up the terminal
    pub fn new(config: Config) -> Result<Self> {
        Lazy::force(&HANZI);
        let ui_language = UiLanguage::load(&config.interface_language_file);
        let catalog = Catalog::scan(&config.languages_dir, &config.texts_dir);
        let state = AppState::new(catalog, ui_language, config.languages_dir.clone());
        let (services, events) = ServiceRunner::new(&config)?;
        let theme = config.active_theme();
        let terminal = Self::setup_terminal()?;

        Ok(Self { config, theme, state, services, events, terminal })
    }

    /// Set up the terminal for TUI rendering
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(terminal)
    }

    /// Restore the terminal to its original state
    fn restore_terminal(&mut self) -> Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }

    /// Run the application main loop
    pub async fn run(&mut self) -> Result<()> {
        // Set up panic hook to restore terminal
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        loop {
            self.refresh_geometry();
            self.terminal.draw(|frame| {
                ui::draw(frame, &self.state, &self.config, &self.theme);
            })?;

            if event::poll(POLL_INTERVAL)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        // The terminal may have been resized since the last frame
                        self.refresh_geometry();
                        if self.handle_key(key) {
                            break;
                        }
                    }
                }
            }

            while let Ok(event) = self.events.try_recv() {
                self.state.handle_service_event(event);
            }
        }

        self.services.cancel_all();
        self.restore_terminal()?;
        Ok(())
    }

    fn refresh_geometry(&mut self) {
        let size = ui::layout::terminal_size();
        let geometry = ui::layout::reader_geometry(size, self.config.cell_width);
        self.state.refresh_geometry(geometry, size);
    }

    /// Handle a key press, returns true if should exit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        let Some(action) = input::key_to_action(self.state.screen, key.code, key.modifiers) else {
            return false;
        };

        match self.state.apply(action) {
            Some(Effect::Quit) => return true,
            Some(Effect::Dispatch { id, request }) => self.services.dispatch(id, request),
            Some(Effect::CancelAll) => self.services.cancel_all(),
            None => {}
        }
        false
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.restore_terminal();
    }
}
