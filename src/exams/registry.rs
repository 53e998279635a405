//! Ordered collection of countdown targets with a selection pointer

use crate::config::defaults::default_exams;
use crate::config::models::Exam;
use crate::error::{Result, WidgetError};
use crate::exams::migration::migrate_legacy_names;
use chrono::NaiveDate;
use tracing::{debug, info};

/// Date format accepted by [`ExamRegistry::add`]
pub const EXAM_DATE_FORMAT: &str = "%Y-%m-%d";

/// Exams in display order plus the selected id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamRegistry {
    exams: Vec<Exam>,
    selected_id: Option<String>,
}

impl ExamRegistry {
    /// Build a registry from explicit parts
    pub fn new(exams: Vec<Exam>, selected_id: Option<String>) -> Self {
        Self { exams, selected_id }
    }

    /// Build the registry from persisted values at startup
    ///
    /// Without stored exams the defaults for `today` are seeded. Legacy exam
    /// names are migrated. Without a stored selection the default exam (or
    /// the first one) is selected.
    pub fn hydrate(
        stored_exams: Option<Vec<Exam>>,
        stored_selected: Option<String>,
        today: NaiveDate,
    ) -> Self {
        let mut exams = stored_exams.unwrap_or_else(|| {
            info!("No stored exams, seeding defaults");
            default_exams(today)
        });
        migrate_legacy_names(&mut exams);

        let selected_id = stored_selected.or_else(|| {
            exams
                .iter()
                .find(|e| e.is_default)
                .or_else(|| exams.first())
                .map(|e| e.id.clone())
        });

        Self { exams, selected_id }
    }

    /// All exams in order
    pub fn exams(&self) -> &[Exam] {
        &self.exams
    }

    /// Number of exams
    pub fn len(&self) -> usize {
        self.exams.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.exams.is_empty()
    }

    /// Stored selection pointer (may name a missing exam)
    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    /// Exam with the given id
    pub fn get(&self, id: &str) -> Option<&Exam> {
        self.exams.iter().find(|e| e.id == id)
    }

    /// The exam the countdown targets
    ///
    /// A selection that names no existing exam falls back to the first entry.
    pub fn active(&self) -> Option<&Exam> {
        self.selected_id
            .as_deref()
            .and_then(|id| self.get(id))
            .or_else(|| self.exams.first())
    }

    /// Point the selection at `id`; unknown ids keep the previous selection
    pub fn select(&mut self, id: &str) -> bool {
        if self.get(id).is_none() {
            debug!("Ignoring selection of unknown exam '{}'", id);
            return false;
        }
        self.selected_id = Some(id.to_string());
        true
    }

    /// Append a user exam created now
    pub fn add(&mut self, name: &str, date: &str) -> Result<Option<&Exam>> {
        self.add_at(name, date, chrono::Utc::now().timestamp_millis())
    }

    /// Append a user exam created at `created_ms` (epoch milliseconds)
    ///
    /// Empty fields are a no-op (`Ok(None)`); an unparseable date is an error
    /// and also leaves the registry unchanged. The id is the creation instant,
    /// bumped until it is unique. The new exam is not selected.
    pub fn add_at(&mut self, name: &str, date: &str, created_ms: i64) -> Result<Option<&Exam>> {
        let name = name.trim();
        let date = date.trim();
        if name.is_empty() || date.is_empty() {
            return Ok(None);
        }
        let date = NaiveDate::parse_from_str(date, EXAM_DATE_FORMAT)
            .map_err(|_| WidgetError::InvalidExamDate(date.to_string()))?;

        let mut stamp = created_ms;
        while self.get(&stamp.to_string()).is_some() {
            stamp += 1;
        }

        let exam = Exam {
            id: stamp.to_string(),
            name: name.to_string(),
            date,
            is_default: false,
        };
        info!("Added exam '{}' on {} (id {})", exam.name, exam.date, exam.id);
        self.exams.push(exam);
        Ok(self.exams.last())
    }

    /// Delete the exam `id`
    ///
    /// Default exams cannot be deleted. Deleting the selected exam moves the
    /// selection to the first remaining exam, or clears it when none remain.
    pub fn remove(&mut self, id: &str) -> bool {
        let Some(index) = self.exams.iter().position(|e| e.id == id) else {
            debug!("Ignoring removal of unknown exam '{}'", id);
            return false;
        };
        if self.exams[index].is_default {
            info!("Refusing to delete default exam '{}'", id);
            return false;
        }

        let removed = self.exams.remove(index);
        info!("Removed exam '{}'", removed.name);
        if self.selected_id.as_deref() == Some(id) {
            self.selected_id = self.exams.first().map(|e| e.id.clone());
        }
        true
    }
}
