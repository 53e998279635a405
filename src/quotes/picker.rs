//! Local quote selection
//!
//! Quotes never rotate on their own; a new one is picked only when the user
//! asks for a refresh.

use crate::config::defaults::default_quotes;
use crate::config::models::{Quote, QuoteSource};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, warn};

/// Uniform index source
pub trait RandomSource: Send {
    /// Index in `0..len`; `len` is never zero
    fn next_index(&mut self, len: usize) -> usize;
}

/// Operating system randomness
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn next_index(&mut self, len: usize) -> usize {
        let mut bytes = [0u8; 8];
        let value = match getrandom::getrandom(&mut bytes) {
            Ok(()) => u64::from_le_bytes(bytes),
            Err(e) => {
                warn!("OS randomness unavailable, falling back to clock: {}", e);
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| u64::from(d.subsec_nanos()) ^ d.as_secs())
                    .unwrap_or_default()
            }
        };
        // Slight modulo bias is irrelevant for a handful of quotes
        let len = u64::try_from(len.max(1)).unwrap_or(u64::MAX);
        usize::try_from(value % len).unwrap_or(0)
    }
}

/// Always picks the same index (modulo the pool size)
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn next_index(&mut self, len: usize) -> usize {
        self.0 % len.max(1)
    }
}

/// Random quote from `pool`, `None` when empty
pub fn pick_from(pool: &[Quote], rng: &mut dyn RandomSource) -> Option<Quote> {
    if pool.is_empty() {
        return None;
    }
    pool.get(rng.next_index(pool.len())).cloned()
}

/// Random built-in quote
pub fn pick_default(rng: &mut dyn RandomSource) -> Quote {
    let pool = default_quotes();
    pick_from(&pool, rng).unwrap_or_else(crate::config::defaults::initial_quote)
}

/// Pick a local quote for `source`
///
/// `custom` uses the user's list, or the built-in list when it is empty.
/// Every other source (including `ai` after a failed fetch) uses the
/// built-in list.
pub fn pick_local(source: QuoteSource, custom: &[Quote], rng: &mut dyn RandomSource) -> Quote {
    let quote = match source {
        QuoteSource::Custom => pick_from(custom, rng).unwrap_or_else(|| pick_default(rng)),
        QuoteSource::Default | QuoteSource::Ai => pick_default(rng),
    };
    debug!("Picked local quote from {:?} pool", source);
    quote
}
