//! Rule-folding classifier and pendency review.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::rules::{
    ActivityCollision, CrossCohortBooking, ShiftIncompatibility, UnassignedInstructor,
    UndefinedRoom,
};
use super::{ClassificationContext, ConflictRule};
use crate::models::{Session, Shift, Status};

/// Separator used when joining reasons for display.
pub const REASON_SEPARATOR: &str = " • ";

/// Derived status of one session plus the reasons behind it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Classification {
    pub status: Status,
    /// Reasons in rule order.
    pub reasons: Vec<String>,
}

impl Classification {
    /// Reasons joined for display (empty when there are none).
    pub fn description(&self) -> String {
        self.reasons.join(REASON_SEPARATOR)
    }
}

/// A session whose status has been replaced by the derived one.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedSession {
    pub session: Session,
    pub reasons: Vec<String>,
}

impl ClassifiedSession {
    /// Derived status.
    #[inline]
    pub fn status(&self) -> Status {
        self.session.status
    }

    /// Reasons joined for display.
    pub fn conflict_reason(&self) -> String {
        self.reasons.join(REASON_SEPARATOR)
    }
}

/// Ordered rule list folded over every session.
///
/// # Example
/// ```
/// use u_timetable::conflicts::ConflictClassifier;
/// use u_timetable::conflicts::rules;
///
/// let classifier = ConflictClassifier::new()
///     .with_rule(rules::UnassignedInstructor)
///     .with_rule(rules::UndefinedRoom);
/// assert_eq!(classifier.rule_names(), vec!["UNASSIGNED_INSTRUCTOR", "UNDEFINED_ROOM"]);
/// ```
#[derive(Clone)]
pub struct ConflictClassifier {
    rules: Vec<Arc<dyn ConflictRule>>,
}

impl ConflictClassifier {
    /// Creates a classifier with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The five built-in rules in precedence order.
    pub fn standard() -> Self {
        Self::new()
            .with_rule(UnassignedInstructor)
            .with_rule(UndefinedRoom)
            .with_rule(CrossCohortBooking)
            .with_rule(ActivityCollision)
            .with_rule(ShiftIncompatibility)
    }

    /// Appends a rule; later rules override earlier statuses.
    pub fn with_rule<R: ConflictRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Rule names in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Classifies one session.
    ///
    /// The fold starts from `UnmappedShift` for sessions outside every
    /// shift band and from `Ok` otherwise; the stored status is ignored.
    pub fn classify(
        &self,
        session: &Session,
        context: &ClassificationContext<'_>,
    ) -> Classification {
        let base = if session.shift == Shift::Unmapped {
            Status::UnmappedShift
        } else {
            Status::Ok
        };

        self.rules
            .iter()
            .filter_map(|rule| rule.evaluate(session, context))
            .fold(
                Classification {
                    status: base,
                    reasons: Vec::new(),
                },
                |mut acc, finding| {
                    acc.status = finding.status;
                    acc.reasons.push(finding.reason);
                    acc
                },
            )
    }

    /// Classifies every session in the context, preserving order.
    pub fn classify_all(&self, context: &ClassificationContext<'_>) -> Vec<ClassifiedSession> {
        let classified: Vec<ClassifiedSession> = context
            .sessions
            .iter()
            .map(|session| {
                let Classification { status, reasons } = self.classify(session, context);
                ClassifiedSession {
                    session: session.clone().with_status(status),
                    reasons,
                }
            })
            .collect();

        tracing::debug!(
            sessions = classified.len(),
            pendencies = classified.iter().filter(|c| c.status().is_pendency()).count(),
            "classified sessions"
        );
        classified
    }

    /// Classified sessions whose derived status is not `Ok`.
    pub fn pendencies(&self, context: &ClassificationContext<'_>) -> Vec<ClassifiedSession> {
        self.classify_all(context)
            .into_iter()
            .filter(|c| c.status().is_pendency())
            .collect()
    }
}

impl Default for ConflictClassifier {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for ConflictClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConflictClassifier")
            .field("rules", &self.rule_names())
            .finish()
    }
}

/// Status selector for pendency review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Conflict,
    MultiClass,
}

impl StatusFilter {
    fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == Status::Pending,
            StatusFilter::Conflict => status == Status::Conflict,
            StatusFilter::MultiClass => status == Status::MultiClass,
        }
    }
}

/// Narrows a pendency list by status and free-text search.
///
/// The search is case-insensitive and matches cohort names, the curricular
/// unit and the instructor name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendencyFilter {
    pub status: StatusFilter,
    pub search: Option<String>,
}

impl PendencyFilter {
    /// Creates a filter that keeps everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts to one status.
    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Sets the search text; blank text disables searching.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        self.search = (!search.trim().is_empty()).then_some(search);
        self
    }

    /// Applies the filter.
    pub fn apply<'a>(&self, items: &'a [ClassifiedSession]) -> Vec<&'a ClassifiedSession> {
        let needle = self.search.as_deref().map(|s| s.trim().to_lowercase());
        items
            .iter()
            .filter(|c| self.status.matches(c.status()))
            .filter(|c| match &needle {
                None => true,
                Some(needle) => {
                    let s = &c.session;
                    s.cohorts.iter().any(|k| k.to_lowercase().contains(needle))
                        || s.curricular_unit.to_lowercase().contains(needle)
                        || s
                            .instructor_name
                            .as_deref()
                            .is_some_and(|n| n.to_lowercase().contains(needle))
                }
            })
            .collect()
    }
}
