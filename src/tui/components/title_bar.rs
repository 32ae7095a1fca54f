// Title bar component
//
// Renders the app name, a spinner while the latest request is outstanding, and
// the URL the current identifier maps to.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let indicator = if app.wallet.is_pending() {
        format!(" {} fetching", app.spinner_char())
    } else {
        String::new()
    };

    let title_text = format!(
        " 💳 Wallet Lookup{} ──── GET {}",
        indicator,
        app.request_url()
    );

    let title = Paragraph::new(title_text)
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title)),
        );

    f.render_widget(title, area);
}
