//! Logs panel component
//!
//! Displays the diagnostic channel: every request outcome lands here as a
//! color-coded log line. Follows new entries until the user scrolls up;
//! End or Esc resumes following.

use super::scrollbar::render_scrollbar;
use crate::logging::LogLevel;
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Handled, Interactive, RenderContext, Scrollable, ScrollableInteractive,
};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

pub struct LogsPanel {
    scroll: ScrollState,
    /// Buffer eviction count as of the last frame
    evicted_seen: u64,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::new(),
            evicted_seen: 0,
        }
    }

    /// Keep a paused view on the same lines while the buffer drops old entries
    pub fn track_evictions(&mut self, evicted: u64) {
        let dropped = evicted.saturating_sub(self.evicted_seen);
        self.evicted_seen = evicted;
        if !self.scroll.auto_follow {
            self.scroll
                .shift_back(usize::try_from(dropped).unwrap_or(usize::MAX));
        }
    }

    pub fn is_following(&self) -> bool {
        self.scroll.auto_follow
    }

    fn follow(&mut self) {
        self.scroll.auto_follow = true;
        self.scroll.scroll_to_bottom();
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let (start, end) = self.scroll.visible_range();
        let end = end.min(ctx.logs.len());
        let start = start.min(end);

        let items: Vec<ListItem> = ctx.logs[start..end]
            .iter()
            .map(|entry| {
                ListItem::new(entry.display_line()).style(level_style(entry.level, ctx.theme))
            })
            .collect();

        let title = if self.scroll.auto_follow {
            " Diagnostics "
        } else {
            " Diagnostics [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(ctx.theme.border_type)
                .border_style(Style::default().fg(ctx.border_color(self.id())))
                .title(title),
        );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll);
    }
}

impl Scrollable for LogsPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::End => {
                self.follow();
                Handled::Yes
            }
            KeyCode::Esc if !self.scroll.auto_follow => {
                self.follow();
                Handled::Yes
            }
            _ => self.handle_scroll_keys(key),
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:scroll  End:follow  q:quit")
    }
}

fn level_style(level: LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.log_error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.log_warn),
        LogLevel::Info => Style::default().fg(theme.log_info),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.log_debug),
    }
}
