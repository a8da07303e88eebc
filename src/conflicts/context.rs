//! Classification context.

use chrono::NaiveDate;

use crate::models::{Instructor, InstructorActivity, Session, Shift, ROOM_PENDING};

/// Immutable snapshot of the collections a classification reads.
///
/// Every rule sees the whole session set: a session's status depends on
/// the other sessions and activities, not only on its own fields.
#[derive(Debug, Clone, Copy)]
pub struct ClassificationContext<'a> {
    pub sessions: &'a [Session],
    pub instructors: &'a [Instructor],
    pub activities: &'a [InstructorActivity],
    /// Room label that marks a room as not yet assigned.
    pub pending_room_label: &'a str,
}

impl<'a> ClassificationContext<'a> {
    /// Creates a context over the given snapshots.
    pub fn new(
        sessions: &'a [Session],
        instructors: &'a [Instructor],
        activities: &'a [InstructorActivity],
    ) -> Self {
        Self {
            sessions,
            instructors,
            activities,
            pending_room_label: ROOM_PENDING,
        }
    }

    /// Sets the room label written by allocations that have no room.
    pub fn with_pending_room_label(mut self, label: &'a str) -> Self {
        self.pending_room_label = label;
        self
    }

    /// Whether `session` has a real room under this context's pending label.
    pub fn has_room(&self, session: &Session) -> bool {
        session.has_room_besides(self.pending_room_label)
    }

    /// Looks up an instructor by id.
    pub fn instructor(&self, id: &str) -> Option<&'a Instructor> {
        self.instructors.iter().find(|i| i.id == id)
    }

    /// Whether a session other than `exclude_id`, taught by `instructor_id`
    /// on `date` during `shift`, satisfies `predicate`.
    pub fn any_session_of(
        &self,
        instructor_id: &str,
        date: NaiveDate,
        shift: Shift,
        exclude_id: &str,
        mut predicate: impl FnMut(&Session) -> bool,
    ) -> bool {
        self.sessions.iter().any(|s| {
            s.id != exclude_id
                && s.date == date
                && s.shift == shift
                && s.instructor_id.as_deref() == Some(instructor_id)
                && predicate(s)
        })
    }

    /// Whether an activity occupies `instructor_id` on `date` during `shift`.
    pub fn has_activity(&self, instructor_id: &str, date: NaiveDate, shift: Shift) -> bool {
        self.activities
            .iter()
            .any(|a| a.occupies(instructor_id, date, shift))
    }
}
