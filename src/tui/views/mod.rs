// Views module - screen layout
//
// One screen: title, form, transactions, diagnostics, status. Panel scroll
// dimensions are synced first, then every component renders from an
// immutable RenderContext.

use super::app::App;
use super::components::{status_bar, title_bar, TransactionsPanel};
use super::traits::{Component, RenderContext, Scrollable};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Height of the diagnostics panel including borders
const LOGS_HEIGHT: u16 = 8;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),           // title
            Constraint::Length(3),           // form
            Constraint::Min(5),              // transactions
            Constraint::Length(LOGS_HEIGHT), // diagnostics
            Constraint::Length(2),           // status
        ])
        .split(f.area());

    let (logs, evicted) = app.log_buffer.snapshot();

    // Sync scroll dimensions before taking the immutable render context
    let tx_count = app.wallet.transactions().len();
    app.transactions_panel
        .update_dimensions(tx_count, TransactionsPanel::viewport_for(chunks[2].height));
    app.logs_panel.track_evictions(evicted);
    app.logs_panel
        .update_dimensions(logs.len(), chunks[3].height.saturating_sub(2) as usize);

    title_bar::render(f, chunks[0], app);

    let ctx = RenderContext {
        theme: &app.theme,
        focus: app.focus,
        wallet: &app.wallet,
        logs: &logs,
    };

    app.form.render(f, chunks[1], &ctx);
    app.transactions_panel.render(f, chunks[2], &ctx);
    app.logs_panel.render(f, chunks[3], &ctx);

    status_bar::render(f, chunks[4], app);
}
