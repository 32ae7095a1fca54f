//! Wallet form component - the identifier input
//!
//! The form never stores the identifier itself. It renders whatever
//! `WalletState` holds and turns keystrokes into the field's new full text,
//! which the App writes back unconditionally. Only the cursor lives here.

use crate::tui::traits::{Component, ComponentId, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Shown when the identifier is empty
pub const PLACEHOLDER: &str = "Put your id here";

/// What a keystroke did to the field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    /// Field text changed; carries the complete new value
    Changed(String),
    /// Enter pressed
    Submit,
    /// Cursor moved, text unchanged
    Moved,
    /// Not a form key
    Ignored,
}

pub struct WalletForm {
    /// Cursor position in chars (not bytes)
    cursor: usize,
}

impl WalletForm {
    /// Cursor starts at the end of the initial value
    pub fn new(initial: &str) -> Self {
        Self {
            cursor: initial.chars().count(),
        }
    }

    /// Apply a key to `current` (the identifier as held in state)
    pub fn handle_key(&mut self, key: KeyEvent, current: &str) -> FormAction {
        let len = current.chars().count();
        self.cursor = self.cursor.min(len);

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Enter => FormAction::Submit,
            KeyCode::Char('u') if ctrl => {
                self.cursor = 0;
                if current.is_empty() {
                    FormAction::Moved
                } else {
                    FormAction::Changed(String::new())
                }
            }
            KeyCode::Char(c) if !ctrl && !alt => {
                let mut text: Vec<char> = current.chars().collect();
                text.insert(self.cursor, c);
                self.cursor += 1;
                FormAction::Changed(text.into_iter().collect())
            }
            KeyCode::Backspace if self.cursor > 0 => {
                let mut text: Vec<char> = current.chars().collect();
                self.cursor -= 1;
                text.remove(self.cursor);
                FormAction::Changed(text.into_iter().collect())
            }
            KeyCode::Delete if self.cursor < len => {
                let mut text: Vec<char> = current.chars().collect();
                text.remove(self.cursor);
                FormAction::Changed(text.into_iter().collect())
            }
            KeyCode::Backspace | KeyCode::Delete => FormAction::Moved,
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                FormAction::Moved
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len);
                FormAction::Moved
            }
            KeyCode::Home => {
                self.cursor = 0;
                FormAction::Moved
            }
            KeyCode::End => {
                self.cursor = len;
                FormAction::Moved
            }
            _ => FormAction::Ignored,
        }
    }

    /// Terminal column offset of the cursor within the field text
    fn cursor_column(&self, text: &str) -> u16 {
        let prefix: String = text.chars().take(self.cursor).collect();
        u16::try_from(prefix.width()).unwrap_or(u16::MAX)
    }
}

impl Component for WalletForm {
    fn id(&self) -> ComponentId {
        ComponentId::Form
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let identifier = ctx.wallet.identifier();
        let focused = ctx.is_focused(self.id());

        let content = if identifier.is_empty() {
            Line::from(Span::styled(
                PLACEHOLDER,
                Style::default()
                    .fg(ctx.theme.muted)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(Span::styled(
                identifier,
                Style::default().fg(ctx.theme.foreground),
            ))
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(ctx.theme.border_type)
            .border_style(Style::default().fg(ctx.border_color(self.id())))
            .title(" Wallet ID ");

        f.render_widget(Paragraph::new(content).block(block), area);

        if focused && area.width > 2 && area.height > 2 {
            let max_x = area.right().saturating_sub(2);
            let x = area
                .x
                .saturating_add(1)
                .saturating_add(self.cursor_column(identifier))
                .min(max_x);
            f.set_cursor_position(Position::new(x, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    /// Feed keys through the form the way the App does, writing each change back
    fn type_keys(form: &mut WalletForm, start: &str, keys: &[KeyEvent]) -> String {
        let mut value = start.to_string();
        for k in keys {
            if let FormAction::Changed(next) = form.handle_key(*k, &value) {
                value = next;
            }
        }
        value
    }

    #[test]
    fn typing_appends_at_cursor_end() {
        let mut form = WalletForm::new("1");
        let value = type_keys(&mut form, "1", &[key(KeyCode::Char('2'))]);
        assert_eq!(value, "12");
        assert_eq!(form.cursor, 2);
    }

    #[test]
    fn change_carries_full_raw_text() {
        let mut form = WalletForm::new("");
        let action = form.handle_key(key(KeyCode::Char(' ')), "");
        assert_eq!(action, FormAction::Changed(" ".to_string()));
    }

    #[test]
    fn clear_then_type_replaces_value() {
        let mut form = WalletForm::new("1");
        let value = type_keys(
            &mut form,
            "1",
            &[ctrl('u'), key(KeyCode::Char('4')), key(KeyCode::Char('2'))],
        );
        assert_eq!(value, "42");
    }

    #[test]
    fn editing_in_the_middle() {
        let mut form = WalletForm::new("ac");
        let value = type_keys(
            &mut form,
            "ac",
            &[key(KeyCode::Left), key(KeyCode::Char('b'))],
        );
        assert_eq!(value, "abc");

        let value = type_keys(
            &mut form,
            &value,
            &[key(KeyCode::Home), key(KeyCode::Delete), key(KeyCode::End), key(KeyCode::Backspace)],
        );
        assert_eq!(value, "b");
    }

    #[test]
    fn multibyte_characters_edit_by_char() {
        let mut form = WalletForm::new("ü");
        let value = type_keys(&mut form, "ü", &[key(KeyCode::Char('ñ')), key(KeyCode::Backspace)]);
        assert_eq!(value, "ü");
        assert_eq!(form.cursor_column("ü"), 1);
    }

    #[test]
    fn enter_submits_and_other_keys_are_ignored() {
        let mut form = WalletForm::new("1");
        assert_eq!(form.handle_key(key(KeyCode::Enter), "1"), FormAction::Submit);
        assert_eq!(form.handle_key(key(KeyCode::F(5)), "1"), FormAction::Ignored);
        assert_eq!(form.handle_key(ctrl('r'), "1"), FormAction::Ignored);
        assert_eq!(form.handle_key(key(KeyCode::Backspace), ""), FormAction::Moved);
    }
}
