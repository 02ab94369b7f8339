//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the search
//! screen, and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! - **Busy** (debounce pending or a search loading): polls every ~80ms so
//!   background actions are picked up quickly and the spinner animates.
//! - **Idle**: sleeps up to 250ms and only redraws on events.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
pub mod components;
pub mod debounce;
pub mod effects;
pub mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::Action;
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::search::{HttpSearchProvider, SearchProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::{ResultListState, SearchBox, SearchBoxEvent};
use crate::tui::effects::EffectRunner;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const BUSY_POLL: Duration = Duration::from_millis(80);
const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub search_box: SearchBox,
    pub result_list: ResultListState,
    /// Endpoint shown in the title bar
    pub endpoint: String,
}

impl TuiState {
    pub fn new(endpoint: &str, initial_query: &str) -> Self {
        Self {
            search_box: SearchBox::with_text(initial_query),
            result_list: ResultListState::new(),
            endpoint: endpoint.to_string(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Build the search provider for a resolved config.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn SearchProvider> {
    Arc::new(HttpSearchProvider::new(config.endpoint.clone()))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    let mut app = App::from_config(provider, &config);
    let mut tui = TuiState::new(&config.endpoint, &config.initial_query);

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new()
        .and_then(|_guard| event_loop(&mut terminal, &mut app, &mut tui));
    ratatui::restore();
    result
}

/// Feed the pre-filled search box text to the reducer so `--query` goes
/// through the same debounce as typing. Uses the box's buffer, not the raw
/// flag, so the reducer and the screen agree on the query.
fn start_initial_search(runner: &mut EffectRunner, app: &mut App, tui: &TuiState) {
    if !tui.search_box.buffer.is_empty() {
        runner.dispatch(app, Action::QueryChanged(tui.search_box.buffer.clone()));
    }
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    // Channel for actions from background tasks (debounce timer, searches)
    let (tx, rx) = mpsc::channel();
    let mut runner = EffectRunner::new(tx);

    start_initial_search(&mut runner, app, tui);

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        if app.is_loading {
            needs_redraw = true; // Spinner animation
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui, spinner_frame))?;
            needs_redraw = false;
        }

        let busy = app.is_loading || runner.has_pending_timer();
        let first_event = poll_event_timeout(if busy { BUSY_POLL } else { IDLE_POLL });
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match event {
                TuiEvent::Resize => {}
                TuiEvent::Quit => {
                    should_quit = runner.dispatch(app, Action::Quit);
                }
                TuiEvent::SelectUp
                | TuiEvent::SelectDown
                | TuiEvent::SelectPageUp
                | TuiEvent::SelectPageDown => {
                    tui.result_list.handle_event(&event);
                }
                _ => {
                    if let Some(SearchBoxEvent::QueryChanged(query)) =
                        tui.search_box.handle_event(&event)
                    {
                        runner.dispatch(app, Action::QueryChanged(query));
                    }
                }
            }
            if should_quit {
                break;
            }
        }

        if should_quit {
            break;
        }

        // Handle background task actions (timer fires, settled searches)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if runner.dispatch(app, action) {
                return Ok(());
            }
        }
    }

    runner.shutdown();
    Ok(())
}
