//! Transactions panel component
//!
//! Renders the "Amount" heading and the transaction list for the current
//! wallet. Everything shown comes from `WalletState`; the panel only owns its
//! scroll position.

use super::scrollbar::render_scrollbar;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Handled, Interactive, RenderContext, Scrollable, ScrollableInteractive,
};
use crossterm::event::KeyEvent;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Rows taken by the heading inside the border
const HEADING_ROWS: u16 = 1;

pub struct TransactionsPanel {
    scroll: ScrollState,
}

impl TransactionsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::manual(),
        }
    }

    /// List rows available for a panel of the given outer height
    pub fn viewport_for(area_height: u16) -> usize {
        area_height.saturating_sub(2 + HEADING_ROWS) as usize
    }

    /// Jump back to the first transaction (new list arrived)
    pub fn reset_scroll(&mut self) {
        self.scroll.reset();
    }
}

impl Default for TransactionsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for TransactionsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Transactions
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let transactions = ctx.wallet.transactions();

        let title = format!(" Transactions ({}) ", transactions.len());
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(ctx.theme.border_type)
            .border_style(Style::default().fg(ctx.border_color(self.id())))
            .title(title);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(HEADING_ROWS), Constraint::Min(0)])
            .split(inner);

        // Amount is intentionally left blank
        let heading = Paragraph::new(Line::from(Span::styled(
            "Amount: ",
            Style::default()
                .fg(ctx.theme.foreground)
                .add_modifier(Modifier::BOLD),
        )));
        f.render_widget(heading, rows[0]);

        if transactions.is_empty() {
            let placeholder = if ctx.wallet.is_pending() {
                "Loading…"
            } else {
                "No transactions"
            };
            f.render_widget(
                Paragraph::new(placeholder).style(Style::default().fg(ctx.theme.muted)),
                rows[1],
            );
            return;
        }

        let (start, end) = self.scroll.visible_range();
        let end = end.min(transactions.len());
        let start = start.min(end);
        let items: Vec<ListItem> = transactions[start..end]
            .iter()
            .enumerate()
            .map(|(i, tx)| {
                ListItem::new(format!("{:>3}. {}", start + i + 1, tx.summary()))
                    .style(Style::default().fg(ctx.theme.foreground))
            })
            .collect();

        f.render_widget(List::new(items), rows[1]);
        render_scrollbar(f, area, &self.scroll);
    }
}

impl Scrollable for TransactionsPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for TransactionsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        self.handle_scroll_keys(key)
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:scroll  PgUp/PgDn:page  q:quit")
    }
}
