//! One-time rename of the seeded exams stored by early versions
//!
//! Early builds seeded the default exams with a bracketed English suffix,
//! e.g. `"高考 (Gaokao)"`. Those records are rewritten to the plain localized
//! name when the registry is hydrated. Already-migrated data is left alone.

use crate::config::defaults::{GAOKAO_ID, GAOKAO_NAME, ZHONGKAO_ID, ZHONGKAO_NAME};
use crate::config::models::Exam;
use tracing::info;

const LEGACY_NAMES: [(&str, &str, &str); 2] = [
    (GAOKAO_ID, "(Gaokao)", GAOKAO_NAME),
    (ZHONGKAO_ID, "(Zhongkao)", ZHONGKAO_NAME),
];

/// Rename legacy seeded exams in place, returning how many were rewritten
pub fn migrate_legacy_names(exams: &mut [Exam]) -> usize {
    let mut migrated = 0;
    for exam in exams.iter_mut() {
        let Some((_, _, localized)) = LEGACY_NAMES
            .iter()
            .find(|(id, suffix, _)| exam.id == *id && exam.name.contains(suffix))
        else {
            continue;
        };
        info!("Migrating legacy exam name '{}' -> '{}'", exam.name, localized);
        exam.name = (*localized).to_string();
        migrated += 1;
    }
    migrated
}
