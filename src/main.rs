//! `Focus Countdown` - exam countdown widget process
//!
//! Reads newline-delimited JSON events from the renderer on stdin and writes
//! render snapshots (`{"type":"render",...}`) and, in overlay mode, host
//! commands (`{"type":"host",...}`) to stdout. All widget state changes
//! happen on the main thread; helper threads only forward input lines and
//! remote quote results.

use anyhow::{Context, Result};
use focus_countdown::{
    config::RuntimeOptions,
    host,
    quotes::{GeminiQuoteProvider, QuoteProvider},
    store::{JsonFileStore, MemoryStore, PersistedStore, StorageBackend},
    utils,
    widget::{Widget, WidgetContext, WidgetEffect, WidgetEvent, WidgetView},
};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::sync::{Arc, mpsc};
use std::sync::mpsc::RecvTimeoutError;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Upper bound on a single wait when no tick is scheduled
const IDLE_WAIT: Duration = Duration::from_secs(3600);

/// Messages funnelled into the main thread
enum LoopMessage {
    /// Raw line from stdin
    Line(String),
    /// Event produced by a helper thread
    Event(WidgetEvent),
    /// stdin reached EOF or failed
    InputClosed,
}

#[derive(Serialize)]
struct RenderMessage<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(flatten)]
    view: &'a WidgetView,
}

/// Main entry point
///
/// Resolves runtime options, initializes logging and the store, hydrates the
/// widget and runs the event loop until `quit` or end of input.
fn main() -> Result<()> {
    let options = RuntimeOptions::from_env();
    let data_dir = options
        .ensure_data_dir()
        .context("Failed to prepare data directory")?;

    utils::init_logging(data_dir).context("Failed to initialize logging system")?;
    options.log_summary();

    let backend: Arc<dyn StorageBackend> = match JsonFileStore::open(data_dir) {
        Ok(store) => Arc::new(store),
        Err(e) => {
            warn!(
                "Persistent store unavailable, changes will not survive a restart: {}",
                e
            );
            Arc::new(MemoryStore::new())
        }
    };

    let provider: Option<Arc<dyn QuoteProvider>> =
        GeminiQuoteProvider::from_key(options.api_key.as_deref())
            .map(|p| Arc::new(p) as Arc<dyn QuoteProvider>);

    let context = WidgetContext::default()
        .with_host(host::resolve_bridge(options.host_mode, std::io::stdout()))
        .with_remote_quotes(provider.is_some())
        .with_tick_interval(options.tick_interval);

    let mut widget = Widget::new(PersistedStore::new(backend), context);
    widget.attach();
    render(&widget);

    let (tx, rx) = mpsc::channel();
    spawn_input_reader(tx.clone());

    info!("Entering main event loop");
    run_event_loop(&mut widget, &rx, &tx, provider.as_ref());

    info!("Focus Countdown shutting down");
    Ok(())
}

fn run_event_loop(
    widget: &mut Widget,
    rx: &mpsc::Receiver<LoopMessage>,
    tx: &mpsc::Sender<LoopMessage>,
    provider: Option<&Arc<dyn QuoteProvider>>,
) {
    loop {
        let timeout = widget
            .time_until_next_tick(Instant::now())
            .unwrap_or(IDLE_WAIT);

        let event = match rx.recv_timeout(timeout) {
            Ok(LoopMessage::Line(line)) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                match serde_json::from_str::<WidgetEvent>(line) {
                    Ok(event) => event,
                    Err(e) => {
                        warn!("Skipping malformed input line: {}", e);
                        continue;
                    }
                }
            }
            Ok(LoopMessage::Event(event)) => event,
            Ok(LoopMessage::InputClosed) => {
                info!("Input closed, exiting");
                widget.shutdown();
                break;
            }
            Err(RecvTimeoutError::Timeout) => {
                if widget.poll_tick(Instant::now()) {
                    render(widget);
                }
                continue;
            }
            Err(RecvTimeoutError::Disconnected) => {
                warn!("Event channel disconnected. Exiting event loop.");
                widget.shutdown();
                break;
            }
        };

        debug!("Dispatching {:?}", event);
        let effect = widget.dispatch(event);
        render(widget);

        match effect {
            Some(WidgetEffect::FetchRemoteQuote) => spawn_quote_fetch(provider.cloned(), tx.clone()),
            Some(WidgetEffect::Exit) => break,
            None => {}
        }
    }
}

/// Forward stdin lines to the main thread
fn spawn_input_reader(tx: mpsc::Sender<LoopMessage>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(LoopMessage::Line(line)).is_err() {
                        return;
                    }
                }
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
        let _ = tx.send(LoopMessage::InputClosed);
    });
}

/// One-shot remote quote request; the result comes back as `QuoteFetched`
fn spawn_quote_fetch(provider: Option<Arc<dyn QuoteProvider>>, tx: mpsc::Sender<LoopMessage>) {
    std::thread::spawn(move || {
        let quote = provider.and_then(|provider| match provider.fetch() {
            Ok(quote) => Some(quote),
            Err(e) => {
                warn!("Remote quote failed: {}", e);
                None
            }
        });
        let _ = tx.send(LoopMessage::Event(WidgetEvent::QuoteFetched { quote }));
    });
}

fn render(widget: &Widget) {
    let view = widget.view();
    let message = RenderMessage {
        kind: "render",
        view: &view,
    };
    let line = match serde_json::to_string(&message) {
        Ok(line) => line,
        Err(e) => {
            warn!("Failed to encode render message: {}", e);
            return;
        }
    };
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{line}").and_then(|()| stdout.flush()) {
        warn!("Failed to write render message: {}", e);
    }
}
