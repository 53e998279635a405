//! Inputs to and outputs of the widget dispatcher
//!
//! Events arrive as one JSON object per line, tagged by `type`, e.g.
//! `{"type":"pointerDown","x":150,"y":200}`.

use crate::config::models::Quote;
use crate::config::settings::SettingsPatch;
use crate::widget::position::PointerTarget;
use serde::{Deserialize, Serialize};

/// Everything the widget reacts to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum WidgetEvent {
    /// Pointer pressed at screen coordinates
    PointerDown {
        /// Horizontal screen coordinate
        x: f64,
        /// Vertical screen coordinate
        y: f64,
        /// Element under the pointer
        #[serde(default)]
        target: PointerTarget,
    },
    /// Pointer moved
    PointerMove {
        /// Horizontal screen coordinate
        x: f64,
        /// Vertical screen coordinate
        y: f64,
    },
    /// Pointer released
    PointerUp,
    /// Pointer entered the widget surface
    PointerEnter,
    /// Pointer left the widget surface
    PointerLeave,
    /// Settings panel opened
    OpenSettings,
    /// Settings panel closed
    CloseSettings,
    /// Lock button pressed
    ToggleLock,
    /// Partial settings change from the settings panel
    UpdateSettings {
        /// Fields to change
        patch: SettingsPatch,
    },
    /// Restore the default look
    ResetAppearance,
    /// Choose the countdown target
    SelectExam {
        /// Exam id
        id: String,
    },
    /// Add a user exam
    AddExam {
        /// Display name
        name: String,
        /// `YYYY-MM-DD`
        date: String,
    },
    /// Delete a user exam
    RemoveExam {
        /// Exam id
        id: String,
    },
    /// Add a quote to the custom list
    AddCustomQuote {
        /// Quote text
        text: String,
        /// Attribution
        #[serde(default)]
        source: Option<String>,
    },
    /// Delete a quote from the custom list
    RemoveCustomQuote {
        /// Position in the custom list
        index: usize,
    },
    /// Refresh button pressed
    RefreshQuote,
    /// Result of a remote fetch; `None` on failure
    QuoteFetched {
        /// The fetched quote
        #[serde(default)]
        quote: Option<Quote>,
    },
    /// The renderer measured new content bounds
    ContentResized {
        /// Width in logical pixels
        width: u32,
        /// Height in logical pixels
        height: u32,
    },
    /// Periodic countdown re-evaluation
    Tick,
    /// Clear all persisted state and restart
    ResetAll,
    /// Exit
    Quit,
}

/// Work the dispatcher asks its caller to perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetEffect {
    /// Run the remote quote provider once and report back with `QuoteFetched`
    FetchRemoteQuote,
    /// Stop the event loop
    Exit,
}
