//! Audit notifications.
//!
//! Completed batch operations emit one [`AuditEvent`]. Delivery is a
//! notification only; planning correctness never depends on it.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of change an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuditAction {
    /// Sessions created through manual (optionally recurring) allocation.
    ManualAllocation,
    /// Sessions created from oracle batch suggestions.
    SuggestionsApplied,
    /// An instructor was assigned to a single pending session.
    InstructorAssigned,
}

/// One audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEvent {
    pub timestamp: DateTime<Utc>,
    pub action: AuditAction,
    /// Cohort the change applies to, when there is one.
    pub course: Option<String>,
    /// Number of sessions created or changed.
    pub session_count: usize,
    /// Human-readable description.
    pub details: String,
}

impl AuditEvent {
    /// Creates an event stamped with the current time.
    pub fn new(action: AuditAction, details: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            action,
            course: None,
            session_count: 0,
            details: details.into(),
        }
    }

    /// Event for a completed manual allocation.
    pub fn allocation(course: &str, session_count: usize) -> Self {
        Self::new(
            AuditAction::ManualAllocation,
            format!("{session_count} sessions allocated for cohort {course}"),
        )
        .for_course(course, session_count)
    }

    /// Event for applied oracle suggestions.
    pub fn suggestions_applied(course: &str, session_count: usize) -> Self {
        Self::new(
            AuditAction::SuggestionsApplied,
            format!("{session_count} suggested sessions scheduled for cohort {course}"),
        )
        .for_course(course, session_count)
    }

    /// Event for an instructor assigned to one session.
    pub fn assignment(course: &str, session_id: &str, instructor_name: &str) -> Self {
        Self::new(
            AuditAction::InstructorAssigned,
            format!("{instructor_name} assigned to session {session_id}"),
        )
        .for_course(course, 1)
    }

    fn for_course(mut self, course: &str, session_count: usize) -> Self {
        self.course = Some(course.to_string());
        self.session_count = session_count;
        self
    }
}

/// Receiver of audit notifications.
pub trait AuditSink: Send + Sync {
    /// Records one event. Must not fail.
    fn record(&self, event: &AuditEvent);
}

/// Forwards events to the `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, event: &AuditEvent) {
        tracing::info!(
            target: "u_timetable::audit",
            action = ?event.action,
            course = event.course.as_deref().unwrap_or("-"),
            sessions = event.session_count,
            "{}",
            event.details
        );
    }
}

/// Keeps events in memory, newest last.
#[derive(Debug, Default)]
pub struct MemoryAuditSink {
    events: Mutex<Vec<AuditEvent>>,
}

impl MemoryAuditSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl AuditSink for MemoryAuditSink {
    fn record(&self, event: &AuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocation_event() {
        let e = AuditEvent::allocation("MEC-01", 12);
        assert_eq!(e.action, AuditAction::ManualAllocation);
        assert_eq!(e.course.as_deref(), Some("MEC-01"));
        assert_eq!(e.session_count, 12);
        assert!(e.details.contains("12"));
        assert!(e.details.contains("MEC-01"));
    }

    #[test]
    fn test_memory_sink() {
        let sink = MemoryAuditSink::new();
        sink.record(&AuditEvent::allocation("A", 1));
        sink.record(&AuditEvent::suggestions_applied("B", 2));
        let events = sink.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].action, AuditAction::SuggestionsApplied);
    }

    #[test]
    fn test_tracing_sink_does_not_panic() {
        TracingAuditSink.record(&AuditEvent::new(AuditAction::InstructorAssigned, "x"));
    }
}
