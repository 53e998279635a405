//! First-run defaults
//!
//! Seed data used when nothing has been persisted yet.

use crate::config::models::{Exam, Quote};
use chrono::{Datelike, NaiveDate};

/// Id of the seeded national college entrance exam
pub const GAOKAO_ID: &str = "gaokao";
/// Id of the seeded high school entrance exam
pub const ZHONGKAO_ID: &str = "zhongkao";
/// Localized name of the college entrance exam
pub const GAOKAO_NAME: &str = "高考";
/// Localized name of the high school entrance exam
pub const ZHONGKAO_NAME: &str = "中考";

const DEFAULT_QUOTES: [(&str, &str); 5] = [
    ("The future depends on what you do today.", "Mahatma Gandhi"),
    ("Believe you can and you're halfway there.", "Theodore Roosevelt"),
    ("Don't watch the clock; do what it does. Keep going.", "Sam Levenson"),
    (
        "Success is the sum of small efforts, repeated day in and day out.",
        "Robert Collier",
    ),
    (
        "You don't have to be great to start, but you have to start to be great.",
        "Zig Ziglar",
    ),
];

/// Built-in quote pool
pub fn default_quotes() -> Vec<Quote> {
    DEFAULT_QUOTES
        .iter()
        .map(|(text, source)| Quote::new(*text, *source))
        .collect()
}

/// Quote shown before the user ever refreshes
pub fn initial_quote() -> Quote {
    let (text, source) = DEFAULT_QUOTES[0];
    Quote::new(text, source)
}

/// Seeded exams for a first run on `today`
///
/// The college entrance exam is on June 7; once that day has passed the
/// countdown targets next year's sitting. The high school exam date is an
/// estimate for the current year.
pub fn default_exams(today: NaiveDate) -> Vec<Exam> {
    let year = today.year();
    let gaokao_this_year = june(year, 7);
    let gaokao = if today > gaokao_this_year {
        june(year + 1, 7)
    } else {
        gaokao_this_year
    };

    vec![
        Exam {
            id: GAOKAO_ID.to_string(),
            name: GAOKAO_NAME.to_string(),
            date: gaokao,
            is_default: true,
        },
        Exam {
            id: ZHONGKAO_ID.to_string(),
            name: ZHONGKAO_NAME.to_string(),
            date: june(year, 20),
            is_default: false,
        },
    ]
}

fn june(year: i32, day: u32) -> NaiveDate {
    // June 7 and June 20 exist in every year chrono can represent
    NaiveDate::from_ymd_opt(year, 6, day).unwrap_or(NaiveDate::MIN)
}
