//! Mouse ownership between the overlay and the desktop beneath it
//!
//! The overlay either captures mouse events or lets them pass through. It
//! captures while the pointer is over the widget, while a drag is running,
//! and unconditionally while the settings panel is open. Leaving the widget
//! mid-drag or with the panel open defers the release until both clear;
//! the end of the drag or the panel closing then re-checks.
//!
//! Only changes of mode produce a host command, so repeated identical
//! states never reach the window layer twice.

use crate::host::HostCommand;
use serde::Serialize;
use tracing::{debug, info};

/// Who receives mouse events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum MouseMode {
    /// Events fall through to the desktop; pointer moves are still forwarded
    Passthrough,
    /// The overlay receives events
    Captured,
}

/// Inputs that can change mouse ownership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassthroughInput {
    /// First evaluation after the host window is ready
    Attach,
    /// Pointer entered the widget surface
    PointerEnter,
    /// Pointer left the widget surface
    PointerLeave,
    /// A drag began
    DragStarted,
    /// The drag finished
    DragEnded,
    /// Settings panel opened
    SettingsOpened,
    /// Settings panel closed
    SettingsClosed,
    /// Re-evaluate without any other change
    Recheck,
}

/// Passthrough state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PassthroughCoordinator {
    hovering: bool,
    dragging: bool,
    settings_open: bool,
    last_emitted: Option<MouseMode>,
}

impl PassthroughCoordinator {
    /// Coordinator that has not emitted anything yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Mode last sent to the host, `None` before attach
    pub fn mode(&self) -> Option<MouseMode> {
        self.last_emitted
    }

    /// Whether the pointer is over the widget
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    fn wants_capture(&self) -> bool {
        self.hovering || self.dragging || self.settings_open
    }

    /// Apply `input`, returning the next state and the host command to send
    pub fn transition(self, input: PassthroughInput) -> (Self, Option<HostCommand>) {
        let mut next = self;
        match input {
            PassthroughInput::Attach | PassthroughInput::Recheck => {}
            PassthroughInput::PointerEnter => next.hovering = true,
            PassthroughInput::PointerLeave => next.hovering = false,
            PassthroughInput::DragStarted => next.dragging = true,
            PassthroughInput::DragEnded => next.dragging = false,
            PassthroughInput::SettingsOpened => next.settings_open = true,
            PassthroughInput::SettingsClosed => next.settings_open = false,
        }

        // Nothing reaches the host before the window is attached
        if self.last_emitted.is_none() && input != PassthroughInput::Attach {
            return (next, None);
        }

        let target = if next.wants_capture() {
            MouseMode::Captured
        } else {
            MouseMode::Passthrough
        };

        if next.last_emitted == Some(target) {
            if input == PassthroughInput::PointerLeave && target == MouseMode::Captured {
                debug!(
                    "Pointer left widget; release deferred (dragging={}, settings_open={})",
                    next.dragging, next.settings_open
                );
            }
            return (next, None);
        }

        info!("Mouse mode -> {:?} ({:?})", target, input);
        next.last_emitted = Some(target);
        (
            next,
            Some(HostCommand::mouse_passthrough(target == MouseMode::Passthrough)),
        )
    }

    /// Forget the emitted mode so the next `Attach` re-sends it
    pub fn detach(&mut self) {
        self.last_emitted = None;
    }
}
