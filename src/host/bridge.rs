//! Commands the widget issues to the window host
//!
//! Every command is fire-and-forget: no acknowledgement comes back and a
//! failure to deliver is never reported to the widget.

use serde::{Deserialize, Serialize};

/// Outbound window-host command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", content = "args", rename_all = "camelCase")]
pub enum HostCommand {
    /// Keep the overlay above other windows
    SetAlwaysOnTop(bool),
    /// Let mouse events fall through to the desktop (`ignore`), optionally
    /// still forwarding pointer moves so hover can be detected
    SetMouseIgnore {
        /// Pass clicks to whatever is beneath the overlay
        ignore: bool,
        /// Keep delivering pointer moves while ignoring
        forward: bool,
    },
    /// Whether the widget surface acts as a window drag region
    SetSurfaceDraggable(bool),
    /// Fit the host window to the rendered content
    ResizeTo {
        /// Width in logical pixels
        width: u32,
        /// Height in logical pixels
        height: u32,
    },
    /// Restart the whole application
    Relaunch,
    /// Exit the application
    Quit,
}

impl HostCommand {
    /// Command for entering passthrough (`true`) or capture (`false`)
    ///
    /// Forwarding stays on while passing through so the next hover over the
    /// widget is still observed.
    pub const fn mouse_passthrough(passthrough: bool) -> Self {
        Self::SetMouseIgnore {
            ignore: passthrough,
            forward: passthrough,
        }
    }
}

/// Channel to the window-manager process
///
/// Implementations must not block for long and must swallow their own
/// delivery errors.
pub trait HostBridge: Send {
    /// Deliver one command
    fn send(&self, command: HostCommand);

    /// Toggle always-on-top
    fn set_always_on_top(&self, enabled: bool) {
        self.send(HostCommand::SetAlwaysOnTop(enabled));
    }

    /// Toggle mouse passthrough
    fn set_mouse_ignore(&self, ignore: bool, forward: bool) {
        self.send(HostCommand::SetMouseIgnore { ignore, forward });
    }

    /// Toggle the drag region
    fn set_surface_draggable(&self, draggable: bool) {
        self.send(HostCommand::SetSurfaceDraggable(draggable));
    }

    /// Resize the host window
    fn resize_to(&self, width: u32, height: u32) {
        self.send(HostCommand::ResizeTo { width, height });
    }

    /// Restart the application
    fn relaunch(&self) {
        self.send(HostCommand::Relaunch);
    }

    /// Exit the application
    fn quit(&self) {
        self.send(HostCommand::Quit);
    }
}
