//! Single entry point for every widget event
//!
//! `Widget` owns the store, the models, the passthrough state, the countdown
//! clock and the optional host bridge. Each event is handled synchronously
//! and completely before the next, so a drag start is always applied before
//! the pointer moves that follow it. Every model change is written through
//! to the store; the store is never read again after hydration.

use crate::config::defaults::initial_quote;
use crate::config::models::{Exam, Position, Quote, QuoteSource, WidgetSettings};
use crate::config::runtime::DEFAULT_TICK_INTERVAL;
use crate::config::settings::{SettingsModel, SettingsPatch};
use crate::countdown::{Countdown, CountdownClock, DateSource, LocalDateSource, TickSchedule};
use crate::exams::ExamRegistry;
use crate::host::{HostBridge, HostCommand};
use crate::quotes::picker::{OsRandom, RandomSource, pick_local};
use crate::store::{PersistedStore, StoreKey};
use crate::widget::events::{WidgetEffect, WidgetEvent};
use crate::widget::passthrough::{MouseMode, PassthroughCoordinator, PassthroughInput};
use crate::widget::position::PositionController;
use serde::Serialize;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Collaborators injected into the widget
pub struct WidgetContext {
    /// Window host; `None` in simulated mode
    pub host: Option<Box<dyn HostBridge>>,
    /// Source of "today"
    pub dates: Box<dyn DateSource>,
    /// Quote selection randomness
    pub rng: Box<dyn RandomSource>,
    /// Whether a remote quote provider is available
    pub remote_quotes: bool,
    /// Countdown tick interval
    pub tick_interval: Duration,
}

impl Default for WidgetContext {
    fn default() -> Self {
        Self {
            host: None,
            dates: Box::new(LocalDateSource),
            rng: Box::new(OsRandom),
            remote_quotes: false,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl WidgetContext {
    /// Attach a host bridge
    #[must_use]
    pub fn with_host(mut self, host: Option<Box<dyn HostBridge>>) -> Self {
        self.host = host;
        self
    }

    /// Replace the date source
    #[must_use]
    pub fn with_dates(mut self, dates: impl DateSource + 'static) -> Self {
        self.dates = Box::new(dates);
        self
    }

    /// Replace the random source
    #[must_use]
    pub fn with_rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Enable or disable remote quote fetches
    #[must_use]
    pub fn with_remote_quotes(mut self, enabled: bool) -> Self {
        self.remote_quotes = enabled;
        self
    }

    /// Change the tick interval
    #[must_use]
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetView {
    /// Exam the countdown targets
    pub exam: Option<Exam>,
    /// Days to show, floored at 0
    pub days: u64,
    /// "Days Left" or "Days Passed"
    pub days_label: &'static str,
    /// Whether the exam day is behind us
    pub is_passed: bool,
    /// Whether the target date line is shown
    pub show_date: bool,
    /// Quote to show, if the layout shows one
    pub quote: Option<Quote>,
    /// Top-left corner
    pub position: Position,
    /// Card background as `(r, g, b, alpha)`
    pub background_rgba: (u8, u8, u8, f32),
    /// Whether a drag is running
    pub is_dragging: bool,
    /// Whether the settings panel is open
    pub is_settings_open: bool,
    /// Last mouse mode sent to the host
    pub mouse_mode: Option<MouseMode>,
    /// Whether a remote quote request is outstanding
    pub is_fetching_quote: bool,
    /// Full settings for the settings panel
    pub settings: WidgetSettings,
    /// All exams for the settings panel
    pub exams: Vec<Exam>,
    /// Selected exam id
    pub selected_exam_id: Option<String>,
}

/// The widget core
pub struct Widget {
    store: PersistedStore,
    host: Option<Box<dyn HostBridge>>,
    dates: Box<dyn DateSource>,
    rng: Box<dyn RandomSource>,
    remote_quotes: bool,

    settings: SettingsModel,
    exams: ExamRegistry,
    position: PositionController,
    passthrough: PassthroughCoordinator,
    clock: CountdownClock,
    quote: Quote,

    settings_open: bool,
    fetching_quote: bool,
    last_size: Option<(u32, u32)>,
    observing_resize: bool,
    schedule: TickSchedule,
    shut_down: bool,
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("settings", self.settings.get())
            .field("exams", &self.exams)
            .field("position", &self.position)
            .field("passthrough", &self.passthrough)
            .field("shut_down", &self.shut_down)
            .finish_non_exhaustive()
    }
}

impl Widget {
    /// Hydrate a widget from `store`
    pub fn new(store: PersistedStore, context: WidgetContext) -> Self {
        let mut widget = Self {
            store,
            host: context.host,
            dates: context.dates,
            rng: context.rng,
            remote_quotes: context.remote_quotes,
            settings: SettingsModel::default(),
            exams: ExamRegistry::default(),
            position: PositionController::default(),
            passthrough: PassthroughCoordinator::new(),
            clock: CountdownClock::new(),
            quote: initial_quote(),
            settings_open: false,
            fetching_quote: false,
            last_size: None,
            observing_resize: true,
            schedule: TickSchedule::start(context.tick_interval, Instant::now()),
            shut_down: false,
        };
        widget.hydrate();
        widget
    }

    fn hydrate(&mut self) {
        let today = self.dates.today();

        self.settings = SettingsModel::load(self.store.load_raw(StoreKey::Settings).as_deref());
        self.exams = ExamRegistry::hydrate(
            self.store.load(StoreKey::Exams),
            self.store.load_selected_exam(),
            today,
        );
        self.position =
            PositionController::new(self.store.load(StoreKey::Position).unwrap_or_default());
        self.quote = self
            .store
            .load(StoreKey::CurrentQuote)
            .unwrap_or_else(initial_quote);

        self.passthrough = PassthroughCoordinator::new();
        self.settings_open = false;
        self.fetching_quote = false;
        self.last_size = None;
        self.clock = CountdownClock::new();
        self.clock
            .set_target(self.exams.active().map(|e| e.date), today);

        // Write back so defaults and migrated data are durable from the first run
        self.persist_all();

        info!(
            "Widget hydrated: {} exam(s), active={:?}",
            self.exams.len(),
            self.exams.active().map(|e| e.name.as_str())
        );
    }

    /// Send the startup host commands: always-on-top, drag region and the
    /// initial mouse mode
    pub fn attach(&mut self) {
        if self.shut_down {
            return;
        }
        let settings = self.settings.get();
        let (on_top, draggable) = (settings.always_on_top, !settings.is_locked);
        self.send(HostCommand::SetAlwaysOnTop(on_top));
        self.send(HostCommand::SetSurfaceDraggable(draggable));
        self.passthrough.detach();
        self.apply_passthrough(PassthroughInput::Attach);
    }

    /// Handle one event
    pub fn dispatch(&mut self, event: WidgetEvent) -> Option<WidgetEffect> {
        if self.shut_down {
            debug!("Ignoring {:?} after shutdown", event);
            return None;
        }

        match event {
            WidgetEvent::PointerDown { x, y, target } => {
                let locked = self.settings.get().is_locked;
                if self
                    .position
                    .begin_drag(Position::new(x, y), target, locked, self.settings_open)
                    .is_ok()
                {
                    self.apply_passthrough(PassthroughInput::DragStarted);
                }
            }
            WidgetEvent::PointerMove { x, y } => {
                self.position.update_drag(Position::new(x, y));
            }
            WidgetEvent::PointerUp => {
                if let Some(position) = self.position.end_drag() {
                    self.store.save(StoreKey::Position, &position);
                    self.apply_passthrough(PassthroughInput::DragEnded);
                }
            }
            WidgetEvent::PointerEnter => self.apply_passthrough(PassthroughInput::PointerEnter),
            WidgetEvent::PointerLeave => self.apply_passthrough(PassthroughInput::PointerLeave),
            WidgetEvent::OpenSettings => {
                self.settings_open = true;
                self.apply_passthrough(PassthroughInput::SettingsOpened);
            }
            WidgetEvent::CloseSettings => {
                self.settings_open = false;
                self.apply_passthrough(PassthroughInput::SettingsClosed);
            }
            WidgetEvent::ToggleLock => {
                let locked = self.settings.toggle_lock();
                self.save_settings();
                self.send(HostCommand::SetSurfaceDraggable(!locked));
            }
            WidgetEvent::UpdateSettings { patch } => self.update_settings(patch),
            WidgetEvent::ResetAppearance => {
                self.settings.reset_appearance();
                self.save_settings();
            }
            WidgetEvent::SelectExam { id } => {
                if self.exams.select(&id) {
                    self.save_selected_exam();
                    self.retarget();
                }
            }
            WidgetEvent::AddExam { name, date } => {
                match self.exams.add(&name, &date).map(|added| added.is_some()) {
                    Ok(true) => {
                        self.save_exams();
                        self.retarget();
                    }
                    Ok(false) => debug!("Ignoring exam with empty name or date"),
                    Err(e) => warn!("Exam not added: {}", e),
                }
            }
            WidgetEvent::RemoveExam { id } => {
                if self.exams.remove(&id) {
                    self.save_exams();
                    self.save_selected_exam();
                    self.retarget();
                }
            }
            WidgetEvent::AddCustomQuote { text, source } => {
                if self.settings.add_custom_quote(&text, source.as_deref()) {
                    self.save_settings();
                }
            }
            WidgetEvent::RemoveCustomQuote { index } => {
                if self.settings.remove_custom_quote(index) {
                    self.save_settings();
                }
            }
            WidgetEvent::RefreshQuote => return self.refresh_quote(),
            WidgetEvent::QuoteFetched { quote } => {
                self.fetching_quote = false;
                let quote = if let Some(quote) = quote {
                    quote
                } else {
                    info!("Remote quote unavailable, using a local quote");
                    let settings = self.settings.get();
                    pick_local(settings.quote_source, &settings.custom_quotes, &mut *self.rng)
                };
                self.set_quote(quote);
            }
            WidgetEvent::ContentResized { width, height } => {
                if self.observing_resize && self.last_size != Some((width, height)) {
                    self.last_size = Some((width, height));
                    self.send(HostCommand::ResizeTo { width, height });
                }
            }
            WidgetEvent::Tick => {
                let today = self.dates.today();
                if self.clock.tick(today) {
                    info!("Countdown rolled over: {:?}", self.clock.current());
                }
            }
            WidgetEvent::ResetAll => self.reset_all(),
            WidgetEvent::Quit => {
                info!("Quit requested");
                self.send(HostCommand::Quit);
                self.shutdown();
                return Some(WidgetEffect::Exit);
            }
        }
        None
    }

    fn update_settings(&mut self, patch: SettingsPatch) {
        let before = self.settings.get().clone();
        let after = self.settings.update(patch);
        self.store.save(StoreKey::Settings, &after);

        if before.always_on_top != after.always_on_top {
            self.send(HostCommand::SetAlwaysOnTop(after.always_on_top));
        }
        if before.is_locked != after.is_locked {
            self.send(HostCommand::SetSurfaceDraggable(!after.is_locked));
        }
    }

    fn refresh_quote(&mut self) -> Option<WidgetEffect> {
        let settings = self.settings.get();
        if settings.quote_source == QuoteSource::Ai && self.remote_quotes {
            if self.fetching_quote {
                debug!("Quote fetch already in flight");
                return None;
            }
            self.fetching_quote = true;
            return Some(WidgetEffect::FetchRemoteQuote);
        }
        let quote = pick_local(settings.quote_source, &settings.custom_quotes, &mut *self.rng);
        self.set_quote(quote);
        None
    }

    fn reset_all(&mut self) {
        info!("Resetting all widget data");
        if let Err(e) = self.store.clear() {
            warn!("Failed to clear stored widget data: {}", e);
        }
        self.send(HostCommand::Relaunch);
        self.hydrate();
        self.attach();
    }

    /// Poll the tick schedule; a due tick re-evaluates the countdown
    pub fn poll_tick(&mut self, now: Instant) -> bool {
        if self.shut_down || !self.schedule.poll(now) {
            return false;
        }
        self.dispatch(WidgetEvent::Tick);
        true
    }

    /// How long the event loop may block before the next tick
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.schedule.time_until_next(now)
    }

    /// Tear down the tick schedule and resize observation; later events are ignored
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.schedule.cancel();
        self.observing_resize = false;
        self.shut_down = true;
        info!("Widget shut down");
    }

    /// Whether `shutdown` has run
    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Current settings
    pub fn settings(&self) -> &WidgetSettings {
        self.settings.get()
    }

    /// Exam registry
    pub fn exams(&self) -> &ExamRegistry {
        &self.exams
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.position.position()
    }

    /// Quote on display
    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    /// Current countdown
    pub fn countdown(&self) -> Option<Countdown> {
        self.clock.current()
    }

    /// Last mouse mode sent to the host
    pub fn mouse_mode(&self) -> Option<MouseMode> {
        self.passthrough.mode()
    }

    /// Renderer snapshot
    pub fn view(&self) -> WidgetView {
        let settings = self.settings.get();
        let countdown = self.clock.current();
        let standard = settings.display_mode == crate::config::models::DisplayMode::Standard;

        WidgetView {
            exam: self.exams.active().cloned(),
            days: countdown.map_or(0, Countdown::display_days),
            days_label: countdown.map_or("Days Left", Countdown::label),
            is_passed: countdown.is_some_and(Countdown::is_passed),
            show_date: standard && settings.show_date,
            quote: (standard && settings.show_quote).then(|| self.quote.clone()),
            position: self.position.position(),
            background_rgba: settings.background_rgba(),
            is_dragging: self.position.is_dragging(),
            is_settings_open: self.settings_open,
            mouse_mode: self.passthrough.mode(),
            is_fetching_quote: self.fetching_quote,
            settings: settings.clone(),
            exams: self.exams.exams().to_vec(),
            selected_exam_id: self.exams.selected_id().map(str::to_string),
        }
    }

    fn send(&self, command: HostCommand) {
        match &self.host {
            Some(host) => host.send(command),
            None => debug!("Simulated host, skipping {:?}", command),
        }
    }

    fn apply_passthrough(&mut self, input: PassthroughInput) {
        let (next, command) = self.passthrough.transition(input);
        self.passthrough = next;
        if let Some(command) = command {
            self.send(command);
        }
    }

    fn retarget(&mut self) {
        let today = self.dates.today();
        self.clock
            .set_target(self.exams.active().map(|e| e.date), today);
    }

    fn set_quote(&mut self, quote: Quote) {
        self.quote = quote;
        self.store.save(StoreKey::CurrentQuote, &self.quote);
    }

    fn save_settings(&self) {
        self.store.save(StoreKey::Settings, self.settings.get());
    }

    fn save_exams(&self) {
        self.store.save(StoreKey::Exams, self.exams.exams());
    }

    fn save_selected_exam(&self) {
        self.store
            .save(StoreKey::SelectedExam, self.exams.selected_id().unwrap_or(""));
    }

    fn persist_all(&self) {
        self.save_settings();
        self.save_exams();
        self.save_selected_exam();
        self.store.save(StoreKey::Position, &self.position.position());
        self.store.save(StoreKey::CurrentQuote, &self.quote);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::defaults::{GAOKAO_ID, ZHONGKAO_ID, default_quotes};
    use crate::countdown::FixedDate;
    use crate::host::RecordingHostBridge;
    use crate::quotes::FixedRandom;
    use crate::store::MemoryStore;
    use crate::test_utils::date;
    use crate::widget::position::PointerTarget;
    use std::sync::Arc;

    struct Harness {
        widget: Widget,
        host: RecordingHostBridge,
        backend: Arc<MemoryStore>,
    }

    fn harness_with(backend: Arc<MemoryStore>, remote_quotes: bool) -> Harness {
        let host = RecordingHostBridge::new();
        let context = WidgetContext::default()
            .with_host(Some(Box::new(host.clone())))
            .with_dates(FixedDate(date(2026, 3, 1)))
            .with_rng(FixedRandom(1))
            .with_remote_quotes(remote_quotes);
        let mut widget = Widget::new(PersistedStore::new(backend.clone()), context);
        widget.attach();
        host.take();
        Harness {
            widget,
            host,
            backend,
        }
    }

    fn harness() -> Harness {
        harness_with(Arc::new(MemoryStore::new()), false)
    }

    fn store_of(h: &Harness) -> PersistedStore {
        PersistedStore::new(h.backend.clone())
    }

    #[test]
    fn test_attach_commands() {
        let host = RecordingHostBridge::new();
        let context = WidgetContext::default()
            .with_host(Some(Box::new(host.clone())))
            .with_dates(FixedDate(date(2026, 3, 1)));
        let mut widget = Widget::new(PersistedStore::new(Arc::new(MemoryStore::new())), context);
        widget.attach();
        assert_eq!(
            host.take(),
            vec![
                HostCommand::SetAlwaysOnTop(true),
                HostCommand::SetSurfaceDraggable(true),
                HostCommand::mouse_passthrough(true),
            ]
        );
        assert_eq!(widget.mouse_mode(), Some(MouseMode::Passthrough));
    }

    #[test]
    fn test_hydrate_persists_defaults() {
        let h = harness();
        let store = store_of(&h);
        assert_eq!(
            store.load::<Vec<Exam>>(StoreKey::Exams).unwrap().len(),
            2
        );
        assert_eq!(store.load_selected_exam().as_deref(), Some(GAOKAO_ID));
        assert_eq!(
            store.load::<Position>(StoreKey::Position),
            Some(Position::new(50.0, 50.0))
        );
        assert_eq!(h.widget.countdown().unwrap().raw_days, 98);
    }

    #[test]
    fn test_drag_persists_final_position() {
        let mut h = harness();
        h.widget.dispatch(WidgetEvent::PointerEnter);
        h.widget.dispatch(WidgetEvent::PointerDown {
            x: 150.0,
            y: 200.0,
            target: PointerTarget::Surface,
        });
        h.widget.dispatch(WidgetEvent::PointerMove { x: 160.0, y: 210.0 });
        assert_eq!(h.widget.position(), Position::new(60.0, 60.0));
        // Not persisted mid-drag
        assert_eq!(
            store_of(&h).load::<Position>(StoreKey::Position),
            Some(Position::new(50.0, 50.0))
        );

        h.widget.dispatch(WidgetEvent::PointerUp);
        assert_eq!(
            store_of(&h).load::<Position>(StoreKey::Position),
            Some(Position::new(60.0, 60.0))
        );
    }

    #[test]
    fn test_leave_mid_drag_keeps_capture() {
        let mut h = harness();
        h.widget.dispatch(WidgetEvent::PointerEnter);
        h.widget.dispatch(WidgetEvent::PointerDown {
            x: 60.0,
            y: 60.0,
            target: PointerTarget::Surface,
        });
        h.widget.dispatch(WidgetEvent::PointerLeave);
        assert_eq!(h.widget.mouse_mode(), Some(MouseMode::Captured));
        h.widget.dispatch(WidgetEvent::PointerUp);
        assert_eq!(h.widget.mouse_mode(), Some(MouseMode::Passthrough));
        assert_eq!(
            h.host.take(),
            vec![
                HostCommand::mouse_passthrough(false),
                HostCommand::mouse_passthrough(true)
            ]
        );
    }

    #[test]
    fn test_locked_widget_does_not_drag() {
        let mut h = harness();
        h.widget.dispatch(WidgetEvent::ToggleLock);
        assert_eq!(h.host.take(), vec![HostCommand::SetSurfaceDraggable(false)]);
        assert!(h.widget.settings().is_locked);

        h.widget.dispatch(WidgetEvent::PointerDown {
            x: 100.0,
            y: 100.0,
            target: PointerTarget::Surface,
        });
        h.widget.dispatch(WidgetEvent::PointerMove { x: 300.0, y: 300.0 });
        assert_eq!(h.widget.position(), Position::new(50.0, 50.0));
        assert!(store_of(&h).load::<WidgetSettings>(StoreKey::Settings).unwrap().is_locked);
    }

    #[test]
    fn test_settings_open_blocks_drag_and_captures() {
        let mut h = harness();
        h.widget.dispatch(WidgetEvent::OpenSettings);
        assert_eq!(h.host.take(), vec![HostCommand::mouse_passthrough(false)]);
        h.widget.dispatch(WidgetEvent::PointerDown {
            x: 100.0,
            y: 100.0,
            target: PointerTarget::Surface,
        });
        assert!(!h.widget.view().is_dragging);
        h.widget.dispatch(WidgetEvent::CloseSettings);
        assert_eq!(h.host.take(), vec![HostCommand::mouse_passthrough(true)]);
    }

    #[test]
    fn test_update_settings_relays_host_flags() {
        let mut h = harness();
        h.widget.dispatch(WidgetEvent::UpdateSettings {
            patch: SettingsPatch {
                always_on_top: Some(false),
                bg_opacity: Some(60),
                ..SettingsPatch::default()
            },
        });
        assert_eq!(h.host.take(), vec![HostCommand::SetAlwaysOnTop(false)]);
        let stored: WidgetSettings = store_of(&h).load(StoreKey::Settings).unwrap();
        assert_eq!(stored.bg_opacity, 60);
        assert!(!stored.always_on_top);

        // Unchanged flags do not reach the host
        h.widget.dispatch(WidgetEvent::UpdateSettings {
            patch: SettingsPatch {
                show_date: Some(false),
                ..SettingsPatch::default()
            },
        });
        assert!(h.host.take().is_empty());
    }

    #[test]
    fn test_exam_selection_retargets_countdown() {
        let mut h = harness();
        h.widget.dispatch(WidgetEvent::SelectExam {
            id: ZHONGKAO_ID.to_string(),
        });
        assert_eq!(h.widget.countdown().unwrap().raw_days, 111);
        assert_eq!(store_of(&h).load_selected_exam().as_deref(), Some(ZHONGKAO_ID));

        h.widget.dispatch(WidgetEvent::SelectExam {
            id: "nope".to_string(),
        });
        assert_eq!(h.widget.exams().selected_id(), Some(ZHONGKAO_ID));
    }

    #[test]
    fn test_remove_selected_exam_falls_back() {
        let mut h = harness();
        h.widget.dispatch(WidgetEvent::SelectExam {
            id: ZHONGKAO_ID.to_string(),
        });
        h.widget.dispatch(WidgetEvent::RemoveExam {
            id: ZHONGKAO_ID.to_string(),
        });
        assert_eq!(h.widget.exams().selected_id(), Some(GAOKAO_ID));
        assert_eq!(store_of(&h).load_selected_exam().as_deref(), Some(GAOKAO_ID));
        assert_eq!(h.widget.countdown().unwrap().raw_days, 98);
    }

    #[test]
    fn test_invalid_exam_is_not_added() {
        let mut h = harness();
        h.widget.dispatch(WidgetEvent::AddExam {
            name: "Quiz".to_string(),
            date: "soon".to_string(),
        });
        assert_eq!(h.widget.exams().len(), 2);
    }

    #[test]
    fn test_refresh_local_quote() {
        let mut h = harness();
        assert_eq!(h.widget.dispatch(WidgetEvent::RefreshQuote), None);
        assert_eq!(*h.widget.quote(), default_quotes()[1]);
        assert_eq!(
            store_of(&h).load::<Quote>(StoreKey::CurrentQuote),
            Some(default_quotes()[1].clone())
        );
    }

    #[test]
    fn test_refresh_custom_quote() {
        let mut h = harness();
        h.widget.dispatch(WidgetEvent::UpdateSettings {
            patch: SettingsPatch {
                quote_source: Some(QuoteSource::Custom),
                custom_quotes: Some(Vec::new()),
                ..SettingsPatch::default()
            },
        });
        h.widget.dispatch(WidgetEvent::AddCustomQuote {
            text: "First".to_string(),
            source: None,
        });
        h.widget.dispatch(WidgetEvent::AddCustomQuote {
            text: "Second".to_string(),
            source: Some("Me".to_string()),
        });
        h.widget.dispatch(WidgetEvent::RefreshQuote);
        assert_eq!(h.widget.quote().text, "Second");
    }

    #[test]
    fn test_ai_refresh_requests_fetch_once() {
        let mut h = harness_with(Arc::new(MemoryStore::new()), true);
        h.widget.dispatch(WidgetEvent::UpdateSettings {
            patch: SettingsPatch {
                quote_source: Some(QuoteSource::Ai),
                ..SettingsPatch::default()
            },
        });
        assert_eq!(
            h.widget.dispatch(WidgetEvent::RefreshQuote),
            Some(WidgetEffect::FetchRemoteQuote)
        );
        assert_eq!(h.widget.dispatch(WidgetEvent::RefreshQuote), None);
        assert!(h.widget.view().is_fetching_quote);

        h.widget.dispatch(WidgetEvent::QuoteFetched {
            quote: Some(Quote::new("Fresh", "AI Wisdom")),
        });
        assert_eq!(h.widget.quote().text, "Fresh");
        assert!(!h.widget.view().is_fetching_quote);
    }

    #[test]
    fn test_failed_fetch_uses_default_quote() {
        let mut h = harness_with(Arc::new(MemoryStore::new()), true);
        h.widget.dispatch(WidgetEvent::QuoteFetched { quote: None });
        assert_eq!(*h.widget.quote(), default_quotes()[1]);
    }

    #[test]
    fn test_ai_without_provider_is_local() {
        let mut h = harness();
        h.widget.dispatch(WidgetEvent::UpdateSettings {
            patch: SettingsPatch {
                quote_source: Some(QuoteSource::Ai),
                ..SettingsPatch::default()
            },
        });
        assert_eq!(h.widget.dispatch(WidgetEvent::RefreshQuote), None);
        assert_eq!(*h.widget.quote(), default_quotes()[1]);
    }

    #[test]
    fn test_resize_only_on_change() {
        let mut h = harness();
        h.widget.dispatch(WidgetEvent::ContentResized {
            width: 320,
            height: 180,
        });
        h.widget.dispatch(WidgetEvent::ContentResized {
            width: 320,
            height: 180,
        });
        assert_eq!(
            h.host.take(),
            vec![HostCommand::ResizeTo {
                width: 320,
                height: 180
            }]
        );
    }

    #[test]
    fn test_reset_all_relaunches_with_defaults() {
        let mut h = harness();
        h.widget.dispatch(WidgetEvent::UpdateSettings {
            patch: SettingsPatch {
                card_width: Some(500),
                ..SettingsPatch::default()
            },
        });
        h.widget.dispatch(WidgetEvent::RemoveExam {
            id: ZHONGKAO_ID.to_string(),
        });
        h.host.take();

        h.widget.dispatch(WidgetEvent::ResetAll);
        let commands = h.host.take();
        assert_eq!(commands[0], HostCommand::Relaunch);
        assert!(commands.contains(&HostCommand::mouse_passthrough(true)));
        assert_eq!(h.widget.settings().card_width, 320);
        assert_eq!(h.widget.exams().len(), 2);
        assert_eq!(
            store_of(&h)
                .load::<WidgetSettings>(StoreKey::Settings)
                .unwrap()
                .card_width,
            320
        );
    }

    #[test]
    fn test_quit_shuts_down() {
        let mut h = harness();
        assert_eq!(
            h.widget.dispatch(WidgetEvent::Quit),
            Some(WidgetEffect::Exit)
        );
        assert_eq!(h.host.take(), vec![HostCommand::Quit]);
        assert!(h.widget.is_shut_down());

        // Everything afterwards is ignored
        h.widget.dispatch(WidgetEvent::ContentResized {
            width: 10,
            height: 10,
        });
        h.widget.dispatch(WidgetEvent::PointerEnter);
        assert!(h.host.take().is_empty());
        assert!(!h.widget.poll_tick(Instant::now() + Duration::from_secs(3600)));
        assert_eq!(h.widget.time_until_next_tick(Instant::now()), None);
    }

    #[test]
    fn test_poll_tick() {
        let mut h = harness();
        let later = Instant::now() + DEFAULT_TICK_INTERVAL + Duration::from_secs(1);
        assert!(h.widget.poll_tick(later));
        assert!(!h.widget.poll_tick(later));
    }

    #[test]
    fn test_simulated_mode_without_host() {
        let mut widget = Widget::new(
            PersistedStore::new(Arc::new(MemoryStore::new())),
            WidgetContext::default().with_dates(FixedDate(date(2026, 3, 1))),
        );
        widget.attach();
        widget.dispatch(WidgetEvent::PointerEnter);
        assert_eq!(widget.mouse_mode(), Some(MouseMode::Captured));
    }

    #[test]
    fn test_view_minimal_hides_quote_and_date() {
        let mut h = harness();
        assert!(h.widget.view().quote.is_some());
        h.widget.dispatch(WidgetEvent::UpdateSettings {
            patch: SettingsPatch {
                display_mode: Some(crate::config::models::DisplayMode::Minimal),
                ..SettingsPatch::default()
            },
        });
        let view = h.widget.view();
        assert!(view.quote.is_none());
        assert!(!view.show_date);
        assert_eq!(view.days, 98);
        assert_eq!(view.days_label, "Days Left");
    }
}
