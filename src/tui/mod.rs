pub mod render;
pub mod state;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use newsdeck::feed::types::Article;
use ratatui::prelude::*;
use state::{Focus, TuiState};
use std::io::stdout;
use std::time::Duration;
use tokio::sync::mpsc;

/// Outcome of one background fetch, delivered to the UI loop as a discrete
/// collection-replacement event.
#[derive(Debug)]
pub enum FeedEvent {
    Batch(Vec<Article>),
    Failed(String),
}

/// Run the TUI until quit. Refresh requests go out on `refresh_tx`; completed
/// fetches come back on `feed_rx`. Blocks its thread; the fetch worker runs
/// on the runtime's other workers.
pub fn run_tui(
    mut state: TuiState,
    refresh_tx: mpsc::Sender<()>,
    mut feed_rx: mpsc::Receiver<FeedEvent>,
) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, &mut state, refresh_tx, &mut feed_rx);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut TuiState,
    refresh_tx: mpsc::Sender<()>,
    feed_rx: &mut mpsc::Receiver<FeedEvent>,
) -> Result<()> {
    loop {
        // Apply completed fetches before drawing.
        while let Ok(feed_event) = feed_rx.try_recv() {
            match feed_event {
                FeedEvent::Batch(articles) => state.session.set_articles(articles),
                FeedEvent::Failed(message) => state.session.set_feed_failed(message),
            }
            state.refreshing = false;
            state.list_offset = 0;
        }

        terminal.draw(|f| render::draw(f, state))?;

        // Poll for keyboard events with a 100ms timeout; the loop doubles as
        // the redraw tick for arriving feed events.
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match state.focus {
            Focus::Search => match key.code {
                KeyCode::Esc | KeyCode::Enter => state.focus = Focus::List,
                KeyCode::Backspace => state.session.pop_search_char(),
                KeyCode::Char(c) => state.session.push_search_char(c),
                _ => {}
            },
            _ => match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Char('/') => state.focus = Focus::Search,
                KeyCode::Esc => state.focus = Focus::List,
                KeyCode::Tab => {
                    if state.focus == Focus::Filters {
                        state.next_section();
                    } else {
                        state.focus = Focus::Filters;
                    }
                }
                KeyCode::Up => state.move_up(),
                KeyCode::Down => state.move_down(),
                KeyCode::Char(' ') | KeyCode::Enter => {
                    if state.focus == Focus::Filters {
                        state.toggle_current();
                    }
                }
                KeyCode::Char('c') => state.session.clear_filters(),
                KeyCode::Char('s') => state.session.cycle_sort(),
                KeyCode::Char('r') => {
                    if !state.refreshing {
                        state.refreshing = true;
                        state.session.set_feed_loading();
                        let _ = refresh_tx.try_send(());
                    }
                }
                _ => {}
            },
        }
    }
}
