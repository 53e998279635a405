//! Host bridge speaking newline-delimited JSON
//!
//! The overlay host (a small native shell) reads one message per line from
//! the widget process. Host messages carry `"type":"host"` so they can share
//! the stream with render output.

use crate::host::bridge::{HostBridge, HostCommand};
use parking_lot::Mutex;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, warn};

#[derive(Serialize)]
struct HostMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    command: &'a HostCommand,
}

/// Writes each command as one JSON line
#[derive(Debug)]
pub struct JsonLineHostBridge<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonLineHostBridge<W> {
    /// Bridge writing to `writer`
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> HostBridge for JsonLineHostBridge<W> {
    fn send(&self, command: HostCommand) {
        let message = HostMessage {
            kind: "host",
            command: &command,
        };
        let line = match serde_json::to_string(&message) {
            Ok(line) => line,
            Err(e) => {
                warn!("Failed to encode host command {:?}: {}", command, e);
                return;
            }
        };

        let mut writer = self.writer.lock();
        if let Err(e) = writeln!(writer, "{line}").and_then(|()| writer.flush()) {
            warn!("Failed to deliver host command {:?}: {}", command, e);
            return;
        }
        debug!("Host command sent: {:?}", command);
    }
}
