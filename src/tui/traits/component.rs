//! Core component trait - the foundation of the UI system
//!
//! Every panel implements `Component`. Rendering receives a `RenderContext`
//! holding read-only views of the theme and wallet state, so a render pass can
//! never fire requests or mutate data.

use crate::logging::LogEntry;
use crate::theme::Theme;
use crate::wallet::WalletState;
use ratatui::{layout::Rect, Frame};

/// Unique identifier for a component, also used for focus tracking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentId {
    /// Identifier input (default focus)
    #[default]
    Form,
    Transactions,
    Logs,
}

impl ComponentId {
    /// Tab order
    pub fn next_focus(self) -> Self {
        match self {
            Self::Form => Self::Transactions,
            Self::Transactions => Self::Logs,
            Self::Logs => Self::Form,
        }
    }

    /// Shift+Tab order
    pub fn prev_focus(self) -> Self {
        match self {
            Self::Form => Self::Logs,
            Self::Transactions => Self::Form,
            Self::Logs => Self::Transactions,
        }
    }
}

/// Immutable context passed to components during rendering
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,
    pub focus: ComponentId,
    pub wallet: &'a WalletState,
    /// Snapshot of the diagnostic log
    pub logs: &'a [LogEntry],
}

impl<'a> RenderContext<'a> {
    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }

    /// Border color for a panel: highlighted when focused
    pub fn border_color(&self, id: ComponentId) -> ratatui::style::Color {
        if self.is_focused(id) {
            self.theme.highlight
        } else {
            self.theme.border
        }
    }
}

/// Base trait for all UI components
pub trait Component {
    fn id(&self) -> ComponentId;

    /// Render the component into `area`
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
