//! Configuration module
//!
//! Persisted widget settings (models, defaults, load/merge/update) and the
//! process-level runtime options resolved from the environment.

pub mod defaults;
pub mod models;
pub mod runtime;
pub mod settings;

pub use models::{
    DisplayMode, Exam, Position, Quote, QuoteSource, QuoteUpdateFreq, ThemeColor, WidgetSettings,
};
pub use runtime::{HostMode, RuntimeOptions};
pub use settings::{SettingsModel, SettingsPatch, merge_with_defaults};
