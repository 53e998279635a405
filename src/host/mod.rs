//! Window-host boundary
//!
//! The host mode is resolved once at startup. In overlay mode the widget
//! gets a bridge; in simulated mode it gets none and every host command is
//! skipped.

pub mod bridge;
pub mod json_line;
pub mod recording;

pub use bridge::{HostBridge, HostCommand};
pub use json_line::JsonLineHostBridge;
pub use recording::RecordingHostBridge;

use crate::config::runtime::HostMode;
use std::io::Write;
use tracing::info;

/// Bridge for the resolved host mode: a JSON-line bridge over `writer` in
/// overlay mode, nothing in simulated mode
pub fn resolve_bridge<W>(mode: HostMode, writer: W) -> Option<Box<dyn HostBridge>>
where
    W: Write + Send + 'static,
{
    match mode {
        HostMode::Overlay => {
            info!("Overlay host detected, host commands enabled");
            Some(Box::new(JsonLineHostBridge::new(writer)))
        }
        HostMode::Simulated => {
            info!("Simulated host, host commands disabled");
            None
        }
    }
}
