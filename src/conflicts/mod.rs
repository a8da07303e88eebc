//! Conflict classification for class sessions.
//!
//! Each session is classified against the full session, instructor and
//! activity collections by an ordered list of rules. Rules are folded left
//! to right: every applicable rule appends its reason, and the status of
//! the last applicable rule wins.
//!
//! # Usage
//!
//! ```
//! use u_timetable::conflicts::{ClassificationContext, ConflictClassifier};
//!
//! let classifier = ConflictClassifier::standard();
//! let context = ClassificationContext::new(&[], &[], &[]);
//! assert!(classifier.pendencies(&context).is_empty());
//! ```
//!
//! Nothing here fails: a dangling instructor reference yields fewer
//! findings, never an error.

mod context;
mod engine;
pub mod rules;

pub use context::ClassificationContext;
pub use engine::{
    Classification, ClassifiedSession, ConflictClassifier, PendencyFilter, StatusFilter,
    REASON_SEPARATOR,
};

use std::fmt::Debug;

use crate::models::{Instructor, InstructorActivity, Session, Status};

/// Outcome of one applicable rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    /// Status the rule assigns.
    pub status: Status,
    /// Human-readable reason.
    pub reason: String,
}

impl Finding {
    /// Creates a finding.
    pub fn new(status: Status, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
        }
    }
}

/// A classification rule.
///
/// Returns `Some(finding)` when the rule applies to the session.
pub trait ConflictRule: Send + Sync + Debug {
    /// Rule name.
    fn name(&self) -> &'static str;

    /// Evaluates the rule for one session.
    fn evaluate(&self, session: &Session, context: &ClassificationContext<'_>) -> Option<Finding>;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Classifies one session with the standard rule set.
pub fn classify(
    session: &Session,
    sessions: &[Session],
    instructors: &[Instructor],
    activities: &[InstructorActivity],
) -> Classification {
    let context = ClassificationContext::new(sessions, instructors, activities);
    ConflictClassifier::standard().classify(session, &context)
}
