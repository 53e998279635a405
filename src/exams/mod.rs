//! Countdown targets
//!
//! The registry owns the exam list and the selection pointer; the migration
//! rewrites names stored by early versions.

pub mod migration;
pub mod registry;

pub use migration::migrate_legacy_names;
pub use registry::ExamRegistry;
