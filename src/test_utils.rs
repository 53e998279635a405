#![expect(
    clippy::unwrap_used,
    reason = "Test utilities use .unwrap() for brevity"
)]

//! Shared test utilities for widget unit tests.
//!
//! Only compiled during testing (`#[cfg(test)]`).

use chrono::NaiveDate;
use std::sync::Mutex;
use tempfile::TempDir;

use crate::config::runtime::HOME_ENV;

/// Serializes tests that modify `FOCUS_COUNTDOWN_HOME`.
static HOME_LOCK: Mutex<()> = Mutex::new(());

/// Create a temporary test directory that cleans up when dropped.
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Shorthand for a calendar date in tests.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// RAII guard that points `FOCUS_COUNTDOWN_HOME` at a temp directory for a
/// test scope and restores the original value when dropped.
///
/// # Safety Considerations
///
/// `std::env::set_var` and `std::env::remove_var` are unsafe because other
/// threads may read the environment concurrently. `HOME_LOCK` is held for the
/// guard's lifetime, so only one test modifies the variable at a time, and
/// the original value is restored on drop (including on panic).
pub struct HomeGuard {
    original: Option<String>,
    _lock: std::sync::MutexGuard<'static, ()>,
}

#[expect(
    unsafe_code,
    reason = "Test-only code that modifies environment variables under a global lock"
)]
impl HomeGuard {
    /// Set `FOCUS_COUNTDOWN_HOME` to the given temp directory path.
    pub fn new(temp_dir: &TempDir) -> Self {
        // A previous test panicking while holding the lock must not poison the rest
        let lock = HOME_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let original = std::env::var(HOME_ENV).ok();
        // SAFETY: HOME_LOCK serializes all writers, and Drop restores the value.
        unsafe {
            std::env::set_var(HOME_ENV, temp_dir.path());
        }
        Self {
            original,
            _lock: lock,
        }
    }
}

#[expect(
    unsafe_code,
    reason = "Test-only code that restores environment variables under a global lock"
)]
impl Drop for HomeGuard {
    fn drop(&mut self) {
        // SAFETY: still holding HOME_LOCK; restoring the pre-test state.
        if let Some(ref original) = self.original {
            unsafe {
                std::env::set_var(HOME_ENV, original);
            }
        } else {
            unsafe {
                std::env::remove_var(HOME_ENV);
            }
        }
    }
}
