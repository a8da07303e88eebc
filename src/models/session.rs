//! Class session model.
//!
//! A session is one scheduled lesson occurrence for one or more cohorts.
//! Its [`Status`] is a coarse hint set at creation time; the conflict
//! classifier recomputes it from the global context on every review.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::Shift;

/// Marker that flags a room as not yet assigned.
pub const ROOM_PENDING: &str = "ROOM PENDING";

/// Marker that flags a curricular unit as not yet chosen.
pub const UNIT_PENDING: &str = "UNIT PENDING";

/// Room labels containing any of these (case-insensitive) count as unassigned.
const PENDING_ROOM_MARKERS: [&str; 2] = ["PENDING", "PENDENTE"];

/// Session validity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// No issues.
    #[default]
    #[serde(rename = "OK")]
    Ok,
    /// No instructor assigned.
    #[serde(alias = "Pendente")]
    Pending,
    /// Room missing, shift mismatch, or administrative collision.
    #[serde(alias = "Conflito")]
    Conflict,
    /// Instructor double-booked across cohorts.
    #[serde(alias = "Multi-Turma")]
    MultiClass,
    /// Start time outside every shift band.
    #[serde(alias = "Turno Não Mapeado")]
    UnmappedShift,
}

impl Status {
    /// Whether the session shows up in pendency review.
    #[inline]
    pub fn is_pendency(self) -> bool {
        self != Status::Ok
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Status::Ok => "OK",
            Status::Pending => "Pending",
            Status::Conflict => "Conflict",
            Status::MultiClass => "Multi-Class",
            Status::UnmappedShift => "Unmapped Shift",
        };
        f.write_str(label)
    }
}

/// One scheduled lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: String,
    /// Calendar date of the lesson.
    pub date: NaiveDate,
    /// Lesson start.
    pub start_time: NaiveTime,
    /// Lesson end.
    pub end_time: NaiveTime,
    /// Band derived from `start_time`.
    pub shift: Shift,
    /// Cohort names attending (conventionally one).
    pub cohorts: Vec<String>,
    /// Instructor display name.
    pub instructor_name: Option<String>,
    /// Instructor foreign key.
    pub instructor_id: Option<String>,
    /// Room display name.
    pub room: Option<String>,
    /// Subject display name.
    pub curricular_unit: String,
    /// Coarse status as last set by a writer.
    pub status: Status,
}

impl Session {
    /// Creates a session; the shift is derived from `start_time`.
    pub fn new(
        id: impl Into<String>,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> Self {
        Self {
            id: id.into(),
            date,
            start_time,
            end_time,
            shift: Shift::from_start_time(start_time),
            cohorts: Vec::new(),
            instructor_name: None,
            instructor_id: None,
            room: None,
            curricular_unit: String::new(),
            status: Status::Ok,
        }
    }

    /// Adds a cohort.
    pub fn with_cohort(mut self, cohort: impl Into<String>) -> Self {
        self.cohorts.push(cohort.into());
        self
    }

    /// Sets the assigned instructor (id and display name).
    pub fn with_instructor(mut self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.instructor_id = Some(id.into());
        self.instructor_name = Some(name.into());
        self
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Sets the curricular unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.curricular_unit = unit.into();
        self
    }

    /// Overrides the derived shift.
    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shift = shift;
        self
    }

    /// Sets the coarse status.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Whether a room is assigned (absent or pending-marked rooms are not).
    pub fn has_room(&self) -> bool {
        self.has_room_besides(ROOM_PENDING)
    }

    /// Like [`Session::has_room`], also treating rooms that contain
    /// `pending_label` (case-insensitive) as unassigned.
    pub fn has_room_besides(&self, pending_label: &str) -> bool {
        let Some(room) = &self.room else {
            return false;
        };
        let upper = room.to_uppercase();
        let label = pending_label.trim().to_uppercase();
        !upper.trim().is_empty()
            && !PENDING_ROOM_MARKERS.iter().any(|m| upper.contains(m))
            && (label.is_empty() || !upper.contains(&label))
    }

    /// Whether `cohort` attends this session.
    pub fn includes_cohort(&self, cohort: &str) -> bool {
        self.cohorts.iter().any(|c| c == cohort)
    }

    /// Whether both sessions serve exactly the same set of cohorts.
    pub fn same_cohorts(&self, other: &Session) -> bool {
        self.cohorts.iter().all(|c| other.includes_cohort(c))
            && other.cohorts.iter().all(|c| self.includes_cohort(c))
    }

    /// Lesson length in minutes (0 if the end precedes the start).
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes().max(0)
    }
}
