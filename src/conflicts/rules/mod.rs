//! Built-in classification rules, in precedence order.
//!
//! | # | Rule | Status | Applies when |
//! |---|------|--------|--------------|
//! | 1 | [`UnassignedInstructor`] | Pending | no instructor id |
//! | 2 | [`UndefinedRoom`] | Conflict | room absent or pending-marked |
//! | 3 | [`CrossCohortBooking`] | MultiClass | instructor teaches another cohort in the same date + shift |
//! | 4 | [`ActivityCollision`] | Conflict | instructor has an activity in the same date + shift |
//! | 5 | [`ShiftIncompatibility`] | Conflict | contract shift does not cover the session's shift |
//!
//! Rules 3 to 5 only run when the instructor id resolves to a roster entry.

use super::{ClassificationContext, ConflictRule, Finding};
use crate::models::{Instructor, Session, Status};

/// Instructor the session is assigned to, if the reference resolves.
fn assigned_instructor<'a>(
    session: &Session,
    context: &ClassificationContext<'a>,
) -> Option<&'a Instructor> {
    let id = session.instructor_id.as_deref().filter(|id| !id.trim().is_empty())?;
    context.instructor(id)
}

/// No instructor assigned.
#[derive(Debug, Clone, Copy)]
pub struct UnassignedInstructor;

impl ConflictRule for UnassignedInstructor {
    fn name(&self) -> &'static str {
        "UNASSIGNED_INSTRUCTOR"
    }

    fn evaluate(&self, session: &Session, _context: &ClassificationContext<'_>) -> Option<Finding> {
        let missing = session
            .instructor_id
            .as_deref()
            .map_or(true, |id| id.trim().is_empty());
        missing.then(|| Finding::new(Status::Pending, "Instructor not assigned"))
    }

    fn description(&self) -> &'static str {
        "Session has no instructor"
    }
}

/// Room absent or still marked pending.
#[derive(Debug, Clone, Copy)]
pub struct UndefinedRoom;

impl ConflictRule for UndefinedRoom {
    fn name(&self) -> &'static str {
        "UNDEFINED_ROOM"
    }

    fn evaluate(&self, session: &Session, context: &ClassificationContext<'_>) -> Option<Finding> {
        (!context.has_room(session)).then(|| Finding::new(Status::Conflict, "Room not defined"))
    }

    fn description(&self) -> &'static str {
        "Session has no room"
    }
}

/// Instructor double-booked with a different cohort set.
///
/// Another session with a different id, the same instructor, date and
/// shift, and a cohort set that is not identical.
#[derive(Debug, Clone, Copy)]
pub struct CrossCohortBooking;

impl ConflictRule for CrossCohortBooking {
    fn name(&self) -> &'static str {
        "CROSS_COHORT_BOOKING"
    }

    fn evaluate(&self, session: &Session, context: &ClassificationContext<'_>) -> Option<Finding> {
        let instructor = assigned_instructor(session, context)?;
        let double_booked = context.any_session_of(
            &instructor.id,
            session.date,
            session.shift,
            &session.id,
            |other| !other.same_cohorts(session),
        );
        double_booked.then(|| {
            Finding::new(
                Status::MultiClass,
                "Instructor already has a class in another cohort",
            )
        })
    }

    fn description(&self) -> &'static str {
        "Instructor teaches another cohort at the same time"
    }
}

/// Instructor holds an administrative/extra activity in the same slot.
#[derive(Debug, Clone, Copy)]
pub struct ActivityCollision;

impl ConflictRule for ActivityCollision {
    fn name(&self) -> &'static str {
        "ACTIVITY_COLLISION"
    }

    fn evaluate(&self, session: &Session, context: &ClassificationContext<'_>) -> Option<Finding> {
        let instructor = assigned_instructor(session, context)?;
        context
            .has_activity(&instructor.id, session.date, session.shift)
            .then(|| {
                Finding::new(
                    Status::Conflict,
                    "Collision with Administrative/Extra Activity",
                )
            })
    }

    fn description(&self) -> &'static str {
        "Instructor has a non-teaching commitment at the same time"
    }
}

/// Session shift outside the instructor's contract shift.
#[derive(Debug, Clone, Copy)]
pub struct ShiftIncompatibility;

impl ConflictRule for ShiftIncompatibility {
    fn name(&self) -> &'static str {
        "SHIFT_INCOMPATIBILITY"
    }

    fn evaluate(&self, session: &Session, context: &ClassificationContext<'_>) -> Option<Finding> {
        let instructor = assigned_instructor(session, context)?;
        (!instructor.work_shift.covers(session.shift)).then(|| {
            Finding::new(
                Status::Conflict,
                format!("Incompatible shift (Contract: {})", instructor.work_shift),
            )
        })
    }

    fn description(&self) -> &'static str {
        "Contract shift does not cover the session"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityCode, InstructorActivity, Shift, WorkShift};
    use chrono::{NaiveDate, NaiveTime};

    fn d() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn session(id: &str, hour: u32) -> Session {
        Session::new(
            id,
            d(),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(hour, 50, 0).unwrap(),
        )
        .with_room("LAB 1")
        .with_cohort("MEC-01")
    }

    #[test]
    fn test_unassigned_instructor() {
        let ctx = ClassificationContext::new(&[], &[], &[]);
        let f = UnassignedInstructor.evaluate(&session("S1", 8), &ctx).unwrap();
        assert_eq!(f.status, Status::Pending);
        assert_eq!(f.reason, "Instructor not assigned");

        let mut blank = session("S2", 8);
        blank.instructor_id = Some(String::new());
        assert!(UnassignedInstructor.evaluate(&blank, &ctx).is_some());

        let assigned = session("S3", 8).with_instructor("I1", "ANA");
        assert!(UnassignedInstructor.evaluate(&assigned, &ctx).is_none());
    }

    #[test]
    fn test_undefined_room() {
        let ctx = ClassificationContext::new(&[], &[], &[]);
        assert!(UndefinedRoom.evaluate(&session("S1", 8), &ctx).is_none());
        let pending = session("S2", 8).with_room("ROOM PENDING");
        let f = UndefinedRoom.evaluate(&pending, &ctx).unwrap();
        assert_eq!(f.status, Status::Conflict);
        assert_eq!(f.reason, "Room not defined");
    }

    #[test]
    fn test_undefined_room_custom_label() {
        let ctx = ClassificationContext::new(&[], &[], &[]).with_pending_room_label("TBD");
        let tbd = session("S1", 8).with_room("TBD");
        assert!(UndefinedRoom.evaluate(&tbd, &ctx).is_some());
        assert!(UndefinedRoom.evaluate(&session("S2", 8), &ctx).is_none());

        let default_ctx = ClassificationContext::new(&[], &[], &[]);
        assert!(UndefinedRoom.evaluate(&tbd, &default_ctx).is_none());
    }

    #[test]
    fn test_cross_cohort_booking() {
        let roster = vec![Instructor::new("I1", "ANA")];
        let a = session("A", 8).with_instructor("I1", "ANA");
        let b = session("B", 9)
            .with_instructor("I1", "ANA")
            .with_cohort("ELE-01");
        let sessions = vec![a.clone(), b.clone()];
        let ctx = ClassificationContext::new(&sessions, &roster, &[]);

        assert_eq!(
            CrossCohortBooking.evaluate(&a, &ctx).map(|f| f.status),
            Some(Status::MultiClass)
        );
        assert!(CrossCohortBooking.evaluate(&b, &ctx).is_some());
    }

    #[test]
    fn test_same_cohort_is_not_cross_booking() {
        let roster = vec![Instructor::new("I1", "ANA")];
        let a = session("A", 8).with_instructor("I1", "ANA");
        let b = session("B", 9).with_instructor("I1", "ANA");
        let sessions = vec![a.clone(), b];
        let ctx = ClassificationContext::new(&sessions, &roster, &[]);
        assert!(CrossCohortBooking.evaluate(&a, &ctx).is_none());
    }

    #[test]
    fn test_other_shift_is_not_cross_booking() {
        let roster = vec![Instructor::new("I1", "ANA")];
        let a = session("A", 8).with_instructor("I1", "ANA");
        let b = session("B", 14)
            .with_instructor("I1", "ANA")
            .with_cohort("ELE-01");
        let sessions = vec![a.clone(), b];
        let ctx = ClassificationContext::new(&sessions, &roster, &[]);
        assert!(CrossCohortBooking.evaluate(&a, &ctx).is_none());
    }

    #[test]
    fn test_activity_collision() {
        let roster = vec![Instructor::new("I1", "ANA")];
        let activities = vec![InstructorActivity::new(
            "X1",
            "I1",
            d(),
            Shift::Morning,
            ActivityCode::Pl,
            4.0,
        )];
        let s = session("A", 8).with_instructor("I1", "ANA");
        let ctx = ClassificationContext::new(std::slice::from_ref(&s), &roster, &activities);
        let f = ActivityCollision.evaluate(&s, &ctx).unwrap();
        assert_eq!(f.status, Status::Conflict);
        assert_eq!(f.reason, "Collision with Administrative/Extra Activity");

        let afternoon = session("B", 14).with_instructor("I1", "ANA");
        assert!(ActivityCollision.evaluate(&afternoon, &ctx).is_none());
    }

    #[test]
    fn test_shift_incompatibility() {
        let roster = vec![Instructor::new("I1", "ANA").with_work_shift(WorkShift::Morning)];
        let ctx = ClassificationContext::new(&[], &roster, &[]);

        let evening = session("A", 19).with_instructor("I1", "ANA");
        let f = ShiftIncompatibility.evaluate(&evening, &ctx).unwrap();
        assert_eq!(f.status, Status::Conflict);
        assert_eq!(f.reason, "Incompatible shift (Contract: Morning)");

        let morning = session("B", 8).with_instructor("I1", "ANA");
        assert!(ShiftIncompatibility.evaluate(&morning, &ctx).is_none());
    }

    #[test]
    fn test_unresolved_instructor_skips_rules() {
        let a = session("A", 19).with_instructor("GHOST", "?");
        let b = session("B", 19)
            .with_instructor("GHOST", "?")
            .with_cohort("ELE-01");
        let activities = vec![InstructorActivity::new(
            "X1",
            "GHOST",
            d(),
            Shift::Evening,
            ActivityCode::Fer,
            4.0,
        )];
        let sessions = vec![a.clone(), b];
        let ctx = ClassificationContext::new(&sessions, &[], &activities);

        assert!(CrossCohortBooking.evaluate(&a, &ctx).is_none());
        assert!(ActivityCollision.evaluate(&a, &ctx).is_none());
        assert!(ShiftIncompatibility.evaluate(&a, &ctx).is_none());
    }
}
