// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard input, timer ticks, settled requests)
// - Rendering the UI

pub mod app;
pub mod components;
pub mod scroll;
pub mod traits;
pub mod views;

use crate::config::Config;
use crate::logging::LogBuffer;
use crate::wallet::FetchOutcome;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use traits::{ComponentId, Handled};

/// Settled requests waiting to be applied; only the latest one matters
const OUTCOME_BUFFER: usize = 64;

/// Run the TUI
///
/// Sets up the terminal, fires the mount request, runs the event loop, and
/// restores the terminal when done.
pub async fn run_tui(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let (outcome_tx, mut outcome_rx) = mpsc::channel(OUTCOME_BUFFER);
    let mut app = App::new(&config, log_buffer, outcome_tx)?;

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    app.mount();

    let result = run_event_loop(&mut terminal, &mut app, &mut outcome_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Keyboard input
/// 2. Timer ticks (spinner animation, uptime)
/// 3. Settled requests from the fetch trigger
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    outcome_rx: &mut mpsc::Receiver<FetchOutcome>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            Some(outcome) = outcome_rx.recv() => {
                app.on_outcome(outcome);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
/// Layered dispatch: Global → Focused component → Fallback quit
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    if handle_global_keys(app, &key_event) {
        return;
    }

    let handled = app.dispatch_to_focused(key_event);

    // 'q' only quits outside the form, where it would otherwise be typed
    if handled == Handled::No
        && app.focus != ComponentId::Form
        && key_event.code == KeyCode::Char('q')
    {
        app.should_quit = true;
    }
}

/// Handle global keys - returns true if handled
fn handle_global_keys(app: &mut App, key_event: &KeyEvent) -> bool {
    let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

    match key_event.code {
        KeyCode::Char('c') if ctrl => {
            app.should_quit = true;
            true
        }
        KeyCode::Char('r') if ctrl => {
            app.submit();
            true
        }
        KeyCode::Esc => {
            // Focused panel gets first chance (logs: resume following)
            if app.dispatch_to_focused(*key_event) == Handled::No {
                app.should_quit = true;
            }
            true
        }
        KeyCode::BackTab => {
            app.focus_prev();
            true
        }
        KeyCode::Tab => {
            if key_event.modifiers.contains(KeyModifiers::SHIFT) {
                app.focus_prev();
            } else {
                app.focus_next();
            }
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tui::traits::Scrollable;

    fn app() -> App {
        let (tx, _rx) = mpsc::channel(1);
        App::new(&Config::default(), LogBuffer::new(), tx).unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn tab_cycles_focus_and_backtab_reverses() {
        let mut app = app();
        assert_eq!(app.focus, ComponentId::Form);

        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, ComponentId::Transactions);
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, ComponentId::Logs);
        handle_key_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, ComponentId::Form);

        handle_key_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.focus, ComponentId::Logs);
    }

    #[test]
    fn q_quits_outside_the_form() {
        let mut app = app();
        app.focus = ComponentId::Transactions;
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn q_in_form_edits_identifier() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.wallet.identifier(), "1q");
    }

    #[test]
    fn esc_quits_from_form() {
        let mut app = app();
        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn esc_in_scrolled_logs_resumes_following_first() {
        let mut app = app();
        app.focus = ComponentId::Logs;
        app.logs_panel.update_dimensions(50, 5);
        app.logs_panel.scroll_up();
        assert!(!app.logs_panel.is_following());

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(!app.should_quit);
        assert!(app.logs_panel.is_following());

        handle_key_event(&mut app, key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_anywhere() {
        let mut app = app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
        assert_eq!(app.wallet.identifier(), "1");
    }

    #[test]
    fn release_events_are_ignored() {
        let mut app = app();
        let mut release = key(KeyCode::Esc);
        release.kind = KeyEventKind::Release;
        handle_key_event(&mut app, release);
        assert!(!app.should_quit);
    }
}
