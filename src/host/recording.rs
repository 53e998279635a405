//! In-memory host bridge
//!
//! Keeps every command for inspection. Clones share the same log, so an
//! embedder can hand one clone to the widget and read the other.

use crate::host::bridge::{HostBridge, HostCommand};
use parking_lot::Mutex;
use std::sync::Arc;

/// Records commands instead of delivering them
#[derive(Debug, Clone, Default)]
pub struct RecordingHostBridge {
    commands: Arc<Mutex<Vec<HostCommand>>>,
}

impl RecordingHostBridge {
    /// Empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far
    pub fn commands(&self) -> Vec<HostCommand> {
        self.commands.lock().clone()
    }

    /// Drain the log
    pub fn take(&self) -> Vec<HostCommand> {
        std::mem::take(&mut *self.commands.lock())
    }
}

impl HostBridge for RecordingHostBridge {
    fn send(&self, command: HostCommand) {
        self.commands.lock().push(command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_log() {
        let recorder = RecordingHostBridge::new();
        let handle = recorder.clone();
        recorder.set_surface_draggable(false);
        recorder.relaunch();

        assert_eq!(
            handle.take(),
            vec![HostCommand::SetSurfaceDraggable(false), HostCommand::Relaunch]
        );
        assert!(recorder.commands().is_empty());
    }
}
