//! `Focus Countdown` - always-visible exam countdown widget
//!
//! The widget counts down to a selected exam and shows a motivational quote.
//! Hosted as a borderless transparent overlay it behaves like a desktop
//! gadget: mouse events pass through to the desktop except while the pointer
//! is over the card, a drag is running, or the settings panel is open.
//!
//! The core is single-threaded and event driven. A [`widget::Widget`]
//! consumes [`widget::WidgetEvent`]s, writes every change through to a
//! [`store::PersistedStore`], and sends fire-and-forget commands to an
//! optional [`host::HostBridge`].

// Module declarations
pub mod config;
pub mod countdown;
pub mod error;
pub mod exams;
pub mod host;
pub mod quotes;
pub mod store;
pub mod utils;
pub mod widget;

#[cfg(test)]
pub(crate) mod test_utils;

// Re-export commonly used types
pub use error::{Result, WidgetError};
