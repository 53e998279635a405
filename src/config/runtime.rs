//! Runtime options resolved once at process start
//!
//! These are process-level settings taken from the environment, as opposed
//! to the user-facing `WidgetSettings` that live in the persisted store.

use crate::error::{Result, StringError, WidgetError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

/// Overrides the data directory (store files and logs)
pub const HOME_ENV: &str = "FOCUS_COUNTDOWN_HOME";
/// Selects the host mode; `overlay` enables host commands
pub const HOST_ENV: &str = "FOCUS_COUNTDOWN_HOST";
/// Preferred remote quote provider key
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
/// Fallback remote quote provider key
pub const LEGACY_API_KEY_ENV: &str = "API_KEY";

/// Default countdown re-evaluation interval
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_secs(60);

const APP_DIR_NAME: &str = "focus-countdown";

/// How the widget is hosted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostMode {
    /// Borderless transparent overlay; host commands are emitted
    Overlay,
    /// Plain window or web simulation; host commands are no-ops
    Simulated,
}

impl HostMode {
    /// Interpret the value of `FOCUS_COUNTDOWN_HOST`
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("overlay") => Self::Overlay,
            _ => Self::Simulated,
        }
    }
}

/// Process-level options
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    /// Directory holding the store files and logs
    pub data_dir: PathBuf,
    /// Resolved host mode
    pub host_mode: HostMode,
    /// Remote quote provider key, if configured
    pub api_key: Option<String>,
    /// Countdown tick interval
    pub tick_interval: Duration,
}

impl RuntimeOptions {
    /// Resolve all options from the process environment
    ///
    /// Resolution happens before logging exists (the log lives in the data
    /// directory), so call [`Self::log_summary`] once logging is up.
    pub fn from_env() -> Self {
        Self {
            data_dir: Self::resolve_data_dir(std::env::var_os(HOME_ENV).map(PathBuf::from)),
            host_mode: HostMode::from_env_value(std::env::var(HOST_ENV).ok().as_deref()),
            api_key: Self::resolve_api_key(
                std::env::var(API_KEY_ENV).ok(),
                std::env::var(LEGACY_API_KEY_ENV).ok(),
            ),
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    /// Log the resolved options (the key itself is never logged)
    pub fn log_summary(&self) {
        info!(
            "Runtime options: data_dir={}, host_mode={:?}, remote quotes {}",
            self.data_dir.display(),
            self.host_mode,
            if self.api_key.is_some() {
                "enabled"
            } else {
                "disabled"
            }
        );
    }

    /// Data directory: explicit override, else the platform config dir, else `./focus-countdown`
    pub fn resolve_data_dir(home_override: Option<PathBuf>) -> PathBuf {
        if let Some(home) = home_override.filter(|p| !p.as_os_str().is_empty()) {
            return home;
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    /// First non-blank key wins
    pub fn resolve_api_key(preferred: Option<String>, legacy: Option<String>) -> Option<String> {
        [preferred, legacy]
            .into_iter()
            .flatten()
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
    }

    /// Create the data directory if needed and return it
    pub fn ensure_data_dir(&self) -> Result<&Path> {
        std::fs::create_dir_all(&self.data_dir).map_err(|e| {
            WidgetError::ConfigError(StringError::new(format!(
                "Cannot create data directory {}: {e}",
                self.data_dir.display()
            )))
        })?;
        Ok(&self.data_dir)
    }
}
