//! Motivational quotes: local pools and the optional remote generator

pub mod picker;
pub mod provider;

pub use picker::{FixedRandom, OsRandom, RandomSource, pick_local};
pub use provider::{GeminiQuoteProvider, QuoteProvider, parse_generated_quote};
