// TUI application state
//
// The App owns the wallet state, the panels and the fetch trigger. Rendering
// only reads from it; requests are fired from the event handlers below
// (mount, submit, identifier edits), never from a render pass.

use super::components::{FormAction, LogsPanel, TransactionsPanel, WalletForm};
use super::traits::{ComponentId, Handled, Interactive};
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::theme::Theme;
use crate::wallet::{
    Applied, FetchOutcome, FetchTrigger, FireReason, TransactionsClient, TriggerStats, WalletState,
};
use anyhow::Result;
use crossterm::event::KeyEvent;
use std::time::Instant;
use tokio::sync::mpsc;

/// Hint shown while the form is focused
const FORM_HINT: &str = "Enter:fetch  Tab:focus  Ctrl+R:refresh  Esc:quit";

pub struct App {
    /// Identifier and transactions; the only source the view reads data from
    pub wallet: WalletState,

    pub form: WalletForm,
    pub transactions_panel: TransactionsPanel,
    pub logs_panel: LogsPanel,

    /// Diagnostic log shared with the tracing layer
    pub log_buffer: LogBuffer,

    pub theme: Theme,
    pub focus: ComponentId,
    pub should_quit: bool,
    pub start_time: Instant,

    trigger: FetchTrigger,
    mounted: bool,
    animation_frame: usize,
}

impl App {
    pub fn new(
        config: &Config,
        log_buffer: LogBuffer,
        outcome_tx: mpsc::Sender<FetchOutcome>,
    ) -> Result<Self> {
        let client = TransactionsClient::new(config.api_url.clone(), &config.fetch)?;
        let trigger = FetchTrigger::new(client, config.fetch.debounce(), outcome_tx);
        let theme = Theme::resolve(&config.theme);
        tracing::debug!(theme = %theme.name, "Theme selected");

        Ok(Self {
            wallet: WalletState::new(config.initial_identifier.clone()),
            form: WalletForm::new(&config.initial_identifier),
            transactions_panel: TransactionsPanel::new(),
            logs_panel: LogsPanel::new(),
            log_buffer,
            theme,
            focus: ComponentId::default(),
            should_quit: false,
            start_time: Instant::now(),
            trigger,
            mounted: false,
            animation_frame: 0,
        })
    }

    // ─────────────────────────────────────────────────────────────────────
    // Fetch lifecycle
    // ─────────────────────────────────────────────────────────────────────

    /// First display: fetch the initial identifier (only once)
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        self.fire(FireReason::Mount);
    }

    /// Fetch the current identifier immediately
    pub fn submit(&mut self) {
        self.fire(FireReason::Submit);
    }

    fn fire(&mut self, reason: FireReason) {
        let generation = self.trigger.fire(self.wallet.identifier(), reason);
        self.wallet.begin_request(generation);
    }

    /// Write the form's new text into state; an actual change schedules a fetch
    pub fn set_identifier(&mut self, text: String) {
        if self.wallet.set_identifier(text) {
            self.fire(FireReason::Edit);
        }
    }

    /// Apply a settled request delivered by the trigger
    pub fn on_outcome(&mut self, outcome: FetchOutcome) -> Applied {
        let generation = outcome.generation;
        let applied = self.wallet.apply(outcome);
        match applied {
            Applied::Updated => self.transactions_panel.reset_scroll(),
            Applied::Stale => {
                tracing::debug!(generation, "Dropped outcome of superseded request");
            }
            Applied::Failed => {}
        }
        applied
    }

    pub fn trigger_stats(&self) -> TriggerStats {
        self.trigger.stats()
    }

    /// URL the current identifier maps to
    pub fn request_url(&self) -> String {
        self.trigger.client().request_url(self.wallet.identifier())
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input routing
    // ─────────────────────────────────────────────────────────────────────

    /// Route a key to the form, applying whatever it produced
    pub fn dispatch_to_form(&mut self, key: KeyEvent) -> Handled {
        match self.form.handle_key(key, self.wallet.identifier()) {
            FormAction::Changed(text) => {
                self.set_identifier(text);
                Handled::Yes
            }
            FormAction::Submit => {
                self.submit();
                Handled::Yes
            }
            FormAction::Moved => Handled::Yes,
            FormAction::Ignored => Handled::No,
        }
    }

    /// Route a key to whichever component has focus
    pub fn dispatch_to_focused(&mut self, key: KeyEvent) -> Handled {
        match self.focus {
            ComponentId::Form => self.dispatch_to_form(key),
            ComponentId::Transactions => self.transactions_panel.handle_key(key),
            ComponentId::Logs => self.logs_panel.handle_key(key),
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next_focus();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev_focus();
    }

    pub fn focus_hint(&self) -> &'static str {
        let hint = match self.focus {
            ComponentId::Form => Some(FORM_HINT),
            ComponentId::Transactions => self.transactions_panel.focus_hint(),
            ComponentId::Logs => self.logs_panel.focus_hint(),
        };
        hint.unwrap_or("")
    }

    // ─────────────────────────────────────────────────────────────────────
    // Animation and uptime
    // ─────────────────────────────────────────────────────────────────────

    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Uptime as HH:MM:SS
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
