mod app_state;
mod card_widget;
mod key_handler;
mod status_bar;
mod ui;

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::*;
use tokio::runtime::Runtime;

use facecards_lib::config::ClientConfig;
use facecards_lib::flashcards::MemoryReviewService;
use facecards_lib::study::SessionSummary;

use crate::app::App;
use app_state::{ImageSource, TuiState};

/// Study a deck on the flashcard service
pub fn run_remote(app: &App, query: &str) -> Result<Option<SessionSummary>> {
    let deck = app.find_deck(query)?;
    let state = TuiState::new(
        deck.id,
        deck.name,
        app.client.clone(),
        ImageSource::Server(Arc::clone(&app.client)),
        app.handle(),
        app.config.request_timeout(),
    );
    run(state)
}

/// Study a folder of photos without a server; reviews last as long as the session
pub fn run_offline(dir: &Path) -> Result<Option<SessionSummary>> {
    let timeout = match ClientConfig::load() {
        Ok(config) => config.request_timeout(),
        Err(e) => {
            log::warn!("Ignoring config: {}", e);
            ClientConfig::default().request_timeout()
        }
    };

    let (service, deck_id) = MemoryReviewService::from_directory(dir)
        .with_context(|| format!("Failed to read photos from {}", dir.display()))?;
    let runtime = Runtime::new().context("Failed to start async runtime")?;
    let deck_name = dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.display().to_string());

    let state = TuiState::new(
        deck_id,
        deck_name,
        Arc::new(service),
        ImageSource::Local,
        runtime.handle().clone(),
        timeout,
    );
    run(state)
}

fn run(mut state: TuiState) -> Result<Option<SessionSummary>> {
    state.start();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Event loop
    let result = run_loop(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    Ok(state.session.summary())
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, state: &mut TuiState) -> Result<()> {
    loop {
        state.poll_completions();
        terminal.draw(|f| ui::draw(f, state))?;

        if state.quit {
            return Ok(());
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    key_handler::handle_key(state, key);
                }
            }
        }
    }
}
