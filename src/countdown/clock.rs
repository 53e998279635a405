//! Days-remaining computation
//!
//! Both ends are calendar dates, so there is no time-of-day or timezone
//! component in the difference. The exam day itself counts as day 0.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::debug;

/// Source of "today" in the local timezone
pub trait DateSource: Send + Sync {
    /// Current local calendar date
    fn today(&self) -> NaiveDate;
}

/// Reads the local wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDateSource;

impl DateSource for LocalDateSource {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date
#[derive(Debug, Clone, Copy)]
pub struct FixedDate(pub NaiveDate);

impl DateSource for FixedDate {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Signed whole days from `today` to `target`; 0 on the exam day
pub fn days_remaining(target: NaiveDate, today: NaiveDate) -> i64 {
    (target - today).num_days()
}

/// Evaluated countdown for one target on one day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    /// Signed difference; negative once the exam is over
    pub raw_days: i64,
}

impl Countdown {
    /// Evaluate `target` as seen on `today`
    pub fn evaluate(target: NaiveDate, today: NaiveDate) -> Self {
        Self {
            raw_days: days_remaining(target, today),
        }
    }

    /// Value to display, floored at 0
    pub fn display_days(self) -> u64 {
        u64::try_from(self.raw_days).unwrap_or(0)
    }

    /// Whether the exam day is behind us
    pub fn is_passed(self) -> bool {
        self.raw_days < 0
    }

    /// Caption under the number
    pub fn label(self) -> &'static str {
        if self.is_passed() {
            "Days Passed"
        } else {
            "Days Left"
        }
    }
}

/// Keeps the countdown for the active exam current
///
/// Re-evaluated immediately when the target changes and on every tick; a
/// tick only changes the result across a midnight rollover.
#[derive(Debug, Clone, Default)]
pub struct CountdownClock {
    target: Option<NaiveDate>,
    current: Option<Countdown>,
}

impl CountdownClock {
    /// Clock with no target
    pub fn new() -> Self {
        Self::default()
    }

    /// Target date, if any
    pub fn target(&self) -> Option<NaiveDate> {
        self.target
    }

    /// Last evaluated countdown
    pub fn current(&self) -> Option<Countdown> {
        self.current
    }

    /// Change the target and re-evaluate at once; returns whether the result changed
    pub fn set_target(&mut self, target: Option<NaiveDate>, today: NaiveDate) -> bool {
        self.target = target;
        self.recompute(today)
    }

    /// Periodic re-evaluation; returns whether the result changed
    pub fn tick(&mut self, today: NaiveDate) -> bool {
        self.recompute(today)
    }

    fn recompute(&mut self, today: NaiveDate) -> bool {
        let next = self.target.map(|t| Countdown::evaluate(t, today));
        let changed = next != self.current;
        if changed {
            debug!("Countdown now {:?} (target {:?})", next, self.target);
        }
        self.current = next;
        changed
    }
}
