//! Countdown evaluation and its periodic tick

pub mod clock;
pub mod schedule;

pub use clock::{Countdown, CountdownClock, DateSource, FixedDate, LocalDateSource, days_remaining};
pub use schedule::TickSchedule;
