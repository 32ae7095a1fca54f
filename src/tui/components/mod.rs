// Components module - reusable UI building blocks
//
// Shell components (title bar, status bar) read the App directly. Panels
// (form, transactions, logs) implement the trait system and render from a
// RenderContext.

pub mod logs_panel;
pub mod scrollbar;
pub mod status_bar;
pub mod title_bar;
pub mod transactions_panel;
pub mod wallet_form;

pub use logs_panel::LogsPanel;
pub use transactions_panel::TransactionsPanel;
pub use wallet_form::{FormAction, WalletForm};
