//! Oracle-assisted slot filling.
//!
//! Finds the empty cells of a course grid and turns batch suggestions into
//! sessions. Suggestions never overwrite existing sessions.

use super::allocation::SlotKey;
use super::generate_id;
use super::slots::{course_slots, generate_course_days};
use crate::config::PlannerConfig;
use crate::models::{Course, Instructor, Session, Status};
use crate::oracle::SlotSuggestion;

/// Slot keys in the first `lookahead_days` course days with no session for
/// the cohort.
pub fn empty_slots(course: &Course, sessions: &[Session], lookahead_days: usize) -> Vec<SlotKey> {
    let day_slots = course_slots(course);
    let slots = day_slots.as_slice();
    let cohort = course.name.as_str();

    generate_course_days(course.start_date, course.end_date)
        .into_iter()
        .take(lookahead_days)
        .flat_map(move |date| {
            slots
                .iter()
                .filter(move |slot| {
                    !sessions.iter().any(|s| {
                        s.date == date
                            && s.start_time == slot.start_time
                            && s.includes_cohort(cohort)
                    })
                })
                .map(move |slot| SlotKey::new(date, slot.ordinal))
        })
        .collect()
}

/// Builds sessions for `suggestions` and appends them to `sessions`.
///
/// Suggestions naming an unknown slot ordinal or an already occupied cell
/// are skipped. Unknown instructors leave the session `Pending`; unknown
/// units fall back to the pending unit label.
pub fn apply_batch_suggestions(
    course: &Course,
    sessions: &[Session],
    instructors: &[Instructor],
    suggestions: &[SlotSuggestion],
    config: &PlannerConfig,
) -> (Vec<Session>, usize) {
    let slots = course_slots(course);
    let mut merged = sessions.to_vec();
    let mut created = 0;

    for suggestion in suggestions {
        let Some(slot) = slots.iter().find(|s| s.ordinal == suggestion.slot_ordinal) else {
            tracing::warn!(
                course = %course.name,
                ordinal = suggestion.slot_ordinal,
                "suggestion names an unknown slot; skipped"
            );
            continue;
        };
        let occupied = merged.iter().any(|s| {
            s.date == suggestion.date
                && s.start_time == slot.start_time
                && s.includes_cohort(&course.name)
        });
        if occupied {
            continue;
        }

        let instructor = instructors.iter().find(|i| i.id == suggestion.instructor_id);
        let unit = course
            .unit(&suggestion.unit_id)
            .map(|u| u.name.clone())
            .unwrap_or_else(|| config.pending_unit_label.clone());

        let mut session =
            Session::new(generate_id("ai-sess"), suggestion.date, slot.start_time, slot.end_time)
                .with_shift(course.shift)
                .with_cohort(course.name.clone())
                .with_room(config.suggested_room_label.clone())
                .with_unit(unit)
                .with_status(Status::Pending);
        if let Some(instructor) = instructor {
            session = session
                .with_instructor(instructor.id.clone(), instructor.name.clone())
                .with_status(Status::Ok);
        }
        merged.push(session);
        created += 1;
    }

    (merged, created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CurriculumUnit;
    use chrono::{NaiveDate, NaiveTime};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn course() -> Course {
        // Saturday 2026-03-07 through Monday 2026-03-09.
        Course::new("C1", "MEC-01", d(7), d(9), t(7, 30), t(11, 30), 55)
            .with_unit(CurriculumUnit::new("U1", "Metrology", 40.0))
    }

    fn suggestion(day: u32, ordinal: u32, instructor: &str, unit: &str) -> SlotSuggestion {
        SlotSuggestion {
            date: d(day),
            slot_ordinal: ordinal,
            instructor_id: instructor.into(),
            unit_id: unit.into(),
            reason: String::new(),
        }
    }

    #[test]
    fn test_empty_slots() {
        let c = course();
        let taken = Session::new("S", d(7), t(8, 25), t(9, 20)).with_cohort("MEC-01");
        let other = Session::new("O", d(7), t(7, 30), t(8, 25)).with_cohort("ELE-01");

        let empty = empty_slots(&c, &[taken, other], 10);
        // Two course days (Sunday skipped) x 4 slots, minus one taken.
        assert_eq!(empty.len(), 7);
        assert!(!empty.contains(&SlotKey::new(d(7), 2)));
        assert!(empty.contains(&SlotKey::new(d(7), 1)));
        assert!(empty.iter().all(|k| k.date != d(8)));

        assert_eq!(empty_slots(&c, &[], 1).len(), 4);
    }

    #[test]
    fn test_apply_suggestions() {
        let c = course();
        let roster = vec![Instructor::new("I1", "ANA")];
        let existing = vec![Session::new("S", d(7), t(7, 30), t(8, 25)).with_cohort("MEC-01")];
        let suggestions = vec![
            suggestion(7, 1, "I1", "U1"), // occupied
            suggestion(7, 2, "I1", "U1"),
            suggestion(7, 3, "I9", "U9"), // unknown instructor and unit
            suggestion(7, 8, "I1", "U1"), // unknown slot
        ];

        let (sessions, created) = apply_batch_suggestions(
            &c,
            &existing,
            &roster,
            &suggestions,
            &PlannerConfig::default(),
        );
        assert_eq!(created, 2);
        assert_eq!(sessions.len(), 3);

        let second = &sessions[1];
        assert_eq!(second.start_time, t(8, 25));
        assert_eq!(second.instructor_id.as_deref(), Some("I1"));
        assert_eq!(second.curricular_unit, "Metrology");
        assert_eq!(second.room.as_deref(), Some("AI ROOM"));
        assert_eq!(second.status, Status::Ok);

        let third = &sessions[2];
        assert_eq!(third.start_time, t(9, 40));
        assert!(third.instructor_id.is_none());
        assert_eq!(third.status, Status::Pending);
        assert_eq!(third.curricular_unit, PlannerConfig::default().pending_unit_label);
    }

    #[test]
    fn test_duplicate_suggestions_collapse() {
        let c = course();
        let roster = vec![Instructor::new("I1", "ANA")];
        let suggestions = vec![suggestion(9, 1, "I1", "U1"), suggestion(9, 1, "I1", "U1")];
        let (sessions, created) =
            apply_batch_suggestions(&c, &[], &roster, &suggestions, &PlannerConfig::default());
        assert_eq!(created, 1);
        assert_eq!(sessions.len(), 1);
    }
}
