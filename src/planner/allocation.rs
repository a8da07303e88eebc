//! Manual allocation with optional weekly recurrence.
//!
//! # Algorithm
//!
//! 1. Expand the selected `(date, slot)` keys: for every selected key, walk
//!    day by day after its date up to the recurrence end date and add the
//!    same slot on every day whose weekday is set in the mask.
//! 2. Drop keys whose slot ordinal the course's day does not have.
//! 3. Remove every existing session of the cohort that starts on a target
//!    key's date at that slot's start time.
//! 4. Append one new session per target key.
//!
//! Re-running an allocation on the same keys therefore replaces sessions
//! instead of duplicating them.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use super::generate_id;
use super::slots::{course_slots, Slot};
use crate::audit::AuditEvent;
use crate::config::PlannerConfig;
use crate::models::{Course, CurriculumUnit, Instructor, Session, Status};

/// A selectable cell of the planning grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub date: NaiveDate,
    /// 1-based slot ordinal within the day.
    pub ordinal: u32,
}

impl SlotKey {
    /// Creates a key.
    pub fn new(date: NaiveDate, ordinal: u32) -> Self {
        Self { date, ordinal }
    }
}

/// Weekly recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    /// Weekday mask, Sunday first.
    pub weekdays: [bool; 7],
    /// Last date (inclusive) occurrences may fall on.
    pub until: NaiveDate,
}

impl Recurrence {
    /// Creates a rule from a Sunday-first mask.
    pub fn new(weekdays: [bool; 7], until: NaiveDate) -> Self {
        Self { weekdays, until }
    }

    /// Creates a rule repeating on the given weekdays.
    pub fn on(days: &[Weekday], until: NaiveDate) -> Self {
        let mut weekdays = [false; 7];
        for day in days {
            weekdays[day.num_days_from_sunday() as usize] = true;
        }
        Self { weekdays, until }
    }

    /// Monday to Friday up to the course end.
    pub fn weekdays_until_course_end(course: &Course) -> Self {
        Self::new(
            [false, true, true, true, true, true, false],
            course.end_date,
        )
    }

    /// Whether `date` falls on a selected weekday.
    #[inline]
    pub fn includes(&self, date: NaiveDate) -> bool {
        self.weekdays[date.weekday().num_days_from_sunday() as usize]
    }
}

/// Expands selected keys by a recurrence rule.
///
/// The selected keys are always part of the result; recurrence only adds.
pub fn expand_keys(
    selected: &BTreeSet<SlotKey>,
    recurrence: Option<&Recurrence>,
) -> BTreeSet<SlotKey> {
    let mut expanded = selected.clone();
    let Some(rule) = recurrence else {
        return expanded;
    };

    for key in selected {
        let following = key.date.iter_days().skip(1);
        for day in following.take_while(|d| *d <= rule.until) {
            if rule.includes(day) {
                expanded.insert(SlotKey::new(day, key.ordinal));
            }
        }
    }
    expanded
}

/// A manual allocation request for one course.
#[derive(Debug, Clone)]
pub struct Allocation<'a> {
    pub course: &'a Course,
    pub keys: BTreeSet<SlotKey>,
    pub instructor: Option<&'a Instructor>,
    pub unit: Option<&'a CurriculumUnit>,
    pub room: Option<String>,
    pub recurrence: Option<Recurrence>,
}

impl<'a> Allocation<'a> {
    /// Creates an empty request for `course`.
    pub fn new(course: &'a Course) -> Self {
        Self {
            course,
            keys: BTreeSet::new(),
            instructor: None,
            unit: None,
            room: None,
            recurrence: None,
        }
    }

    /// Selects a slot.
    pub fn with_key(mut self, date: NaiveDate, ordinal: u32) -> Self {
        self.keys.insert(SlotKey::new(date, ordinal));
        self
    }

    /// Selects several slots.
    pub fn with_keys(mut self, keys: impl IntoIterator<Item = SlotKey>) -> Self {
        self.keys.extend(keys);
        self
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: &'a Instructor) -> Self {
        self.instructor = Some(instructor);
        self
    }

    /// Sets the curriculum unit.
    pub fn with_unit(mut self, unit: &'a CurriculumUnit) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Sets the room.
    pub fn with_room(mut self, room: impl Into<String>) -> Self {
        self.room = Some(room.into());
        self
    }

    /// Sets the recurrence rule.
    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = Some(recurrence);
        self
    }
}

/// Result of an allocation.
#[derive(Debug, Clone)]
pub struct AllocationOutcome {
    /// Full replacement session collection.
    pub sessions: Vec<Session>,
    /// Ids of the newly created sessions.
    pub created: Vec<String>,
    /// Number of pre-existing sessions that were overwritten.
    pub replaced: usize,
    /// Notification for the audit collaborator; `None` when nothing changed.
    pub event: Option<AuditEvent>,
}

impl AllocationOutcome {
    fn unchanged(sessions: &[Session]) -> Self {
        Self {
            sessions: sessions.to_vec(),
            created: Vec::new(),
            replaced: 0,
            event: None,
        }
    }
}

/// Expands an allocation into sessions and merges them into `sessions`.
///
/// An empty key set returns the collection unchanged.
pub fn expand_allocation(
    sessions: &[Session],
    allocation: &Allocation<'_>,
    config: &PlannerConfig,
) -> AllocationOutcome {
    if allocation.keys.is_empty() {
        return AllocationOutcome::unchanged(sessions);
    }

    let course = allocation.course;
    let slots = course_slots(course);
    let keys = expand_keys(&allocation.keys, allocation.recurrence.as_ref());
    let targets: Vec<(SlotKey, &Slot)> = keys
        .into_iter()
        .filter_map(|key| match slots.iter().find(|s| s.ordinal == key.ordinal) {
            Some(slot) => Some((key, slot)),
            None => {
                tracing::warn!(
                    course = %course.name,
                    date = %key.date,
                    ordinal = key.ordinal,
                    "allocation key names a slot outside the course day; skipped"
                );
                None
            }
        })
        .collect();

    if targets.is_empty() {
        return AllocationOutcome::unchanged(sessions);
    }

    let is_overwritten = |existing: &Session| {
        existing.includes_cohort(&course.name)
            && targets.iter().any(|(key, slot)| {
                existing.date == key.date && existing.start_time == slot.start_time
            })
    };

    let mut merged: Vec<Session> = sessions
        .iter()
        .filter(|s| !is_overwritten(s))
        .cloned()
        .collect();
    let replaced = sessions.len() - merged.len();

    let room = allocation
        .room
        .clone()
        .filter(|r| !r.trim().is_empty())
        .unwrap_or_else(|| config.pending_room_label.clone());
    let unit = allocation
        .unit
        .map(|u| u.name.clone())
        .unwrap_or_else(|| config.pending_unit_label.clone());
    let status = if allocation.instructor.is_some() {
        Status::Ok
    } else {
        Status::Pending
    };

    let mut created = Vec::with_capacity(targets.len());
    for (key, slot) in &targets {
        let mut session = Session::new(
            generate_id("sess"),
            key.date,
            slot.start_time,
            slot.end_time,
        )
        .with_shift(course.shift)
        .with_cohort(course.name.clone())
        .with_room(room.clone())
        .with_unit(unit.clone())
        .with_status(status);
        if let Some(instructor) = allocation.instructor {
            session = session.with_instructor(instructor.id.clone(), instructor.name.clone());
        }
        created.push(session.id.clone());
        merged.push(session);
    }

    tracing::info!(
        course = %course.name,
        created = created.len(),
        replaced,
        "allocation applied"
    );

    AllocationOutcome {
        sessions: merged,
        event: Some(AuditEvent::allocation(&course.name, created.len())),
        created,
        replaced,
    }
}
