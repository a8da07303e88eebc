//! Planning board.
//!
//! [`PlanningBoard`] owns the authoritative session, instructor, activity
//! and course collections. Every operation hands immutable snapshots to the
//! planning engines and replaces the affected collection wholesale with the
//! result, so no partially applied state is ever observable.

mod roster;

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::audit::{AuditEvent, AuditSink, TracingAuditSink};
use crate::config::PlannerConfig;
use crate::conflicts::{
    ClassificationContext, ClassifiedSession, ConflictClassifier, PendencyFilter,
};
use crate::error::{PlannerError, Result};
use crate::metrics::{BoardMetrics, InstructorLoad};
use crate::models::{Course, Instructor, InstructorActivity, Session, Status};
use crate::oracle::{BatchPrompt, InstructorSuggestion, PendencyPrompt, SuggestionOracle};
use crate::planner::{
    apply_batch_suggestions, course_slots, curriculum_progress, empty_slots, expand_allocation,
    Allocation, Recurrence, SlotKey, UnitProgress,
};
use crate::ranking::{CandidateRanker, ScoredInstructor};
use crate::validation::{validate_board, ValidationResult};

/// Sets the instructor of one session.
///
/// The session's coarse status becomes `MultiClass` when the candidate was
/// already busy (class or activity) in that date and shift, `Ok` otherwise.
/// An unknown `session_id` returns the collection unchanged.
pub fn assign_instructor(
    sessions: &[Session],
    session_id: &str,
    candidate: &ScoredInstructor<'_>,
) -> Vec<Session> {
    let status = if candidate.has_class_conflict || candidate.has_admin_conflict {
        Status::MultiClass
    } else {
        Status::Ok
    };

    sessions
        .iter()
        .map(|s| {
            if s.id == session_id {
                s.clone()
                    .with_instructor(
                        candidate.instructor.id.clone(),
                        candidate.instructor.name.clone(),
                    )
                    .with_status(status)
            } else {
                s.clone()
            }
        })
        .collect()
}

/// Board-level allocation request, referencing entities by id.
///
/// Unknown instructor or unit ids degrade to a pending allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRequest {
    pub course_id: String,
    pub keys: BTreeSet<SlotKey>,
    pub instructor_id: Option<String>,
    pub unit_id: Option<String>,
    pub room: Option<String>,
    pub recurrence: Option<Recurrence>,
}

impl AllocationRequest {
    /// Creates an empty request for a course.
    pub fn new(course_id: impl Into<String>) -> Self {
        Self {
            course_id: course_id.into(),
            keys: BTreeSet::new(),
            instructor_id: None,
            unit_id: None,
            room: None,
            recurrence: None,
        }
    }

    /// Adds one selected cell.
    pub fn with_key(mut self, key: SlotKey) -> Self {
        self.keys.insert(key);
        self
    }

    pub fn with_instructor(mut self, instructor_id: impl Into<String>) -> Self {
        self.instructor_id = Some(instructor_id.into());
        self
    }

    pub fn with_unit(mut self, unit_id: impl Into<String>) -> Self {
        self.unit_id = Some(unit_id.into());
        self
    }

    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }
}

/// Single owner of the planning collections.
pub struct PlanningBoard {
    sessions: Vec<Session>,
    instructors: Vec<Instructor>,
    activities: Vec<InstructorActivity>,
    courses: Vec<Course>,
    config: PlannerConfig,
    classifier: ConflictClassifier,
    audit: Arc<dyn AuditSink>,
}

impl PlanningBoard {
    /// Creates an empty board that audits through `tracing`.
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            sessions: Vec::new(),
            instructors: Vec::new(),
            activities: Vec::new(),
            courses: Vec::new(),
            config,
            classifier: ConflictClassifier::standard(),
            audit: Arc::new(TracingAuditSink),
        }
    }

    /// Sets the audit sink.
    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit = sink;
        self
    }

    /// Replaces the classifier rule set.
    pub fn with_classifier(mut self, classifier: ConflictClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn with_sessions(mut self, sessions: Vec<Session>) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_instructors(mut self, instructors: Vec<Instructor>) -> Self {
        self.instructors = instructors;
        self
    }

    pub fn with_activities(mut self, activities: Vec<InstructorActivity>) -> Self {
        self.activities = activities;
        self
    }

    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = courses;
        self
    }

    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn instructors(&self) -> &[Instructor] {
        &self.instructors
    }

    pub fn activities(&self) -> &[InstructorActivity] {
        &self.activities
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Replaces the session collection (e.g. after an import).
    pub fn replace_sessions(&mut self, sessions: Vec<Session>) {
        tracing::debug!(count = sessions.len(), "session collection replaced");
        self.sessions = sessions;
    }

    /// Replaces the instructor roster (e.g. after an import).
    pub fn replace_instructors(&mut self, instructors: Vec<Instructor>) {
        tracing::debug!(count = instructors.len(), "instructor roster replaced");
        self.instructors = instructors;
    }

    /// Registers a course.
    pub fn add_course(&mut self, course: Course) {
        tracing::info!(course = %course.name, "course registered");
        self.courses.push(course);
    }

    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn instructor(&self, id: &str) -> Option<&Instructor> {
        self.instructors.iter().find(|i| i.id == id)
    }

    pub fn session(&self, id: &str) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    /// Integrity report over all collections.
    pub fn validate(&self) -> ValidationResult {
        validate_board(&self.sessions, &self.instructors, &self.activities, &self.courses)
    }

    /// Snapshot for the classifier.
    pub fn context(&self) -> ClassificationContext<'_> {
        ClassificationContext::new(&self.sessions, &self.instructors, &self.activities)
            .with_pending_room_label(&self.config.pending_room_label)
    }

    /// Every session with its freshly derived status.
    pub fn classified(&self) -> Vec<ClassifiedSession> {
        self.classifier.classify_all(&self.context())
    }

    /// Sessions whose derived status is not `Ok`.
    pub fn pendencies(&self) -> Vec<ClassifiedSession> {
        self.classifier.pendencies(&self.context())
    }

    /// Pendencies narrowed by `filter`.
    pub fn filtered_pendencies(&self, filter: &PendencyFilter) -> Vec<ClassifiedSession> {
        let all = self.pendencies();
        filter.apply(&all).into_iter().cloned().collect()
    }

    fn ranker(&self) -> CandidateRanker {
        CandidateRanker::new().with_weights(self.config.weights)
    }

    /// Ranked candidates for a session, optionally pinning `suggested`.
    pub fn candidates(
        &self,
        session_id: &str,
        suggested: Option<&str>,
    ) -> Result<Vec<ScoredInstructor<'_>>> {
        let session = self.session(session_id).ok_or_else(|| not_found("session", session_id))?;
        Ok(self.ranker().rank(
            session,
            &self.instructors,
            &self.sessions,
            &self.activities,
            suggested,
        ))
    }

    /// Expands an allocation request and applies it.
    ///
    /// Returns the ids of the created sessions. An empty key set changes
    /// nothing.
    pub fn allocate(&mut self, request: &AllocationRequest) -> Result<Vec<String>> {
        let outcome = {
            let course = self
                .course(&request.course_id)
                .ok_or_else(|| not_found("course", &request.course_id))?;

            let mut allocation = Allocation::new(course).with_keys(request.keys.iter().copied());
            if let Some(instructor) = request
                .instructor_id
                .as_deref()
                .and_then(|id| self.instructor(id))
            {
                allocation = allocation.with_instructor(instructor);
            }
            if let Some(unit) = request.unit_id.as_deref().and_then(|id| course.unit(id)) {
                allocation = allocation.with_unit(unit);
            }
            if let Some(room) = &request.room {
                allocation = allocation.with_room(room.clone());
            }
            if let Some(recurrence) = &request.recurrence {
                allocation = allocation.with_recurrence(recurrence.clone());
            }
            expand_allocation(&self.sessions, &allocation, &self.config)
        };

        self.sessions = outcome.sessions;
        if let Some(event) = &outcome.event {
            self.audit.record(event);
        }
        Ok(outcome.created)
    }

    /// Assigns an instructor to one session.
    pub fn assign_instructor(&mut self, session_id: &str, instructor_id: &str) -> Result<()> {
        let (sessions, event) = {
            let session = self.session(session_id).ok_or_else(|| not_found("session", session_id))?;
            let instructor = self
                .instructor(instructor_id)
                .ok_or_else(|| not_found("instructor", instructor_id))?;
            let candidate = self
                .ranker()
                .score(instructor, session, &self.sessions, &self.activities);
            let course = session.cohorts.first().map(String::as_str).unwrap_or_default();
            (
                assign_instructor(&self.sessions, session_id, &candidate),
                AuditEvent::assignment(course, session_id, &instructor.name),
            )
        };

        self.sessions = sessions;
        self.audit.record(&event);
        Ok(())
    }

    /// Asks the oracle for an instructor for one pendency.
    pub fn suggest_for_pendency<O: SuggestionOracle + ?Sized>(
        &self,
        session_id: &str,
        oracle: &O,
    ) -> Result<Option<InstructorSuggestion>> {
        let session = self.session(session_id).ok_or_else(|| not_found("session", session_id))?;
        let problem = self.classifier.classify(session, &self.context()).description();
        Ok(oracle.suggest_single(&PendencyPrompt {
            session,
            problem: &problem,
            roster: &self.instructors,
        }))
    }

    /// Fills the course's empty cells from oracle batch suggestions.
    ///
    /// Only the first `batch_lookahead_days` course days are offered to the
    /// oracle. Returns the number of sessions created.
    pub fn fill_with_suggestions<O: SuggestionOracle + ?Sized>(
        &mut self,
        course_id: &str,
        oracle: &O,
    ) -> Result<usize> {
        let (sessions, created, event) = {
            let course = self.course(course_id).ok_or_else(|| not_found("course", course_id))?;
            let slots = course_slots(course);
            let empty = empty_slots(course, &self.sessions, self.config.batch_lookahead_days);
            let instructors: Vec<&Instructor> = self
                .instructors
                .iter()
                .filter(|i| i.is_active() && i.area == course.area)
                .collect();

            let suggestions = oracle.suggest_batch(&BatchPrompt {
                course,
                slots: &slots,
                empty_slots: &empty,
                instructors,
            });
            let (sessions, created) = apply_batch_suggestions(
                course,
                &self.sessions,
                &self.instructors,
                &suggestions,
                &self.config,
            );
            (
                sessions,
                created,
                AuditEvent::suggestions_applied(&course.name, created),
            )
        };

        if created > 0 {
            self.sessions = sessions;
            self.audit.record(&event);
        }
        Ok(created)
    }

    /// Board indicators over the derived statuses.
    pub fn metrics(&self) -> BoardMetrics {
        let sessions: Vec<Session> = self.classified().into_iter().map(|c| c.session).collect();
        BoardMetrics::calculate(
            &sessions,
            &self.activities,
            self.config.pending_session_hours,
            &self.config.pending_room_label,
        )
    }

    /// Workload of one instructor for a month.
    pub fn instructor_load(
        &self,
        instructor_id: &str,
        year: i32,
        month: u32,
    ) -> Result<InstructorLoad> {
        let instructor = self
            .instructor(instructor_id)
            .ok_or_else(|| not_found("instructor", instructor_id))?;
        Ok(InstructorLoad::calculate(
            instructor,
            &self.sessions,
            &self.activities,
            year,
            month,
            self.config.weeks_per_month,
        ))
    }

    /// Allocated versus target hours per curriculum unit.
    pub fn progress(&self, course_id: &str) -> Result<Vec<UnitProgress>> {
        let course = self.course(course_id).ok_or_else(|| not_found("course", course_id))?;
        Ok(curriculum_progress(course, &self.sessions))
    }
}

impl std::fmt::Debug for PlanningBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlanningBoard")
            .field("sessions", &self.sessions.len())
            .field("instructors", &self.instructors.len())
            .field("activities", &self.activities.len())
            .field("courses", &self.courses.len())
            .field("classifier", &self.classifier)
            .finish()
    }
}

fn not_found(kind: &'static str, id: &str) -> PlannerError {
    PlannerError::NotFound {
        kind,
        id: id.to_string(),
    }
}
