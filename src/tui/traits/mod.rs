//! Component trait system for the TUI
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                     App                     │
//! │  (routes keys, applies fetch outcomes)      │
//! └─────────────────────────────────────────────┘
//!            │              │              │
//!            ▼              ▼              ▼
//!      ┌──────────┐  ┌──────────────┐  ┌──────────┐
//!      │   Form   │  │ Transactions │  │   Logs   │
//!      └──────────┘  └──────────────┘  └──────────┘
//! ```
//!
//! - [`Component`] - render + identity
//! - [`Scrollable`] - panels with a `ScrollState`
//! - [`Interactive`] - panels that take keyboard input

mod component;
mod interactive;
mod scrollable;

pub use component::{Component, ComponentId, RenderContext};
pub use interactive::{Handled, Interactive, ScrollableInteractive};
pub use scrollable::Scrollable;
