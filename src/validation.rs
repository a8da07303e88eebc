//! Integrity checks for planning data.
//!
//! Checks structural integrity of imported or hand-built collections.
//! Detects:
//! - Duplicate IDs
//! - References to unknown instructors
//! - Malformed courses (inverted dates, empty daily window, zero lesson
//!   duration, empty curriculum)
//! - Sessions ending before they start
//!
//! Validation only reports. Nothing is rejected: the planning engines
//! tolerate every issue listed here by flagging, skipping or degrading.

use std::collections::HashSet;

use crate::models::{Course, Instructor, InstructorActivity, Session};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// A session or activity references an instructor that doesn't exist.
    UnknownInstructor,
    /// A course ends before it starts.
    InvertedDateRange,
    /// A course's daily end is not after its daily start.
    EmptyDailyWindow,
    /// A course has a zero lesson duration.
    ZeroLessonDuration,
    /// A course has no curriculum units.
    EmptyCurriculum,
    /// A session ends before it starts.
    InvertedSession,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn check_unique<'a>(
    kind: &str,
    ids: impl IntoIterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {kind} ID: {id}"),
            ));
        }
    }
    seen
}

/// Validates the planning collections.
///
/// Checks:
/// 1. No duplicate IDs within sessions, instructors, activities, courses
/// 2. Session and activity instructor references resolve
/// 3. Courses have an ordered date range, a positive daily window, a
///    non-zero lesson duration and at least one curriculum unit
/// 4. Sessions do not end before they start
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_board(
    sessions: &[Session],
    instructors: &[Instructor],
    activities: &[InstructorActivity],
    courses: &[Course],
) -> ValidationResult {
    let mut errors = Vec::new();

    let instructor_ids = check_unique(
        "instructor",
        instructors.iter().map(|i| i.id.as_str()),
        &mut errors,
    );
    check_unique("session", sessions.iter().map(|s| s.id.as_str()), &mut errors);
    check_unique("activity", activities.iter().map(|a| a.id.as_str()), &mut errors);
    check_unique("course", courses.iter().map(|c| c.id.as_str()), &mut errors);

    for session in sessions {
        if let Some(id) = session.instructor_id.as_deref().filter(|id| !id.trim().is_empty()) {
            if !instructor_ids.contains(id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownInstructor,
                    format!("Session '{}' references unknown instructor '{id}'", session.id),
                ));
            }
        }
        if session.end_time < session.start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedSession,
                format!(
                    "Session '{}' ends at {} before starting at {}",
                    session.id, session.end_time, session.start_time
                ),
            ));
        }
    }

    for activity in activities {
        if !instructor_ids.contains(activity.instructor_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownInstructor,
                format!(
                    "Activity '{}' references unknown instructor '{}'",
                    activity.id, activity.instructor_id
                ),
            ));
        }
    }

    for course in courses {
        if course.end_date < course.start_date {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvertedDateRange,
                format!(
                    "Course '{}' ends on {} before starting on {}",
                    course.id, course.end_date, course.start_date
                ),
            ));
        }
        if course.daily_end_time <= course.daily_start_time {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyDailyWindow,
                format!("Course '{}' has no daily teaching window", course.id),
            ));
        }
        if course.lesson_duration_minutes == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroLessonDuration,
                format!("Course '{}' has a zero lesson duration", course.id),
            ));
        }
        if course.curriculum.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCurriculum,
                format!("Course '{}' has no curriculum units", course.id),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityCode, CurriculumUnit, Shift};
    use chrono::{NaiveDate, NaiveTime};

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn sample_course() -> Course {
        Course::new("C1", "MEC-01", d(2), d(31), t(7, 30), t(11, 30), 55)
            .with_unit(CurriculumUnit::new("U1", "Metrology", 40.0))
    }

    fn sample_instructors() -> Vec<Instructor> {
        vec![Instructor::new("I1", "ANA"), Instructor::new("I2", "BIA")]
    }

    fn kinds(errors: &[ValidationError]) -> Vec<ValidationErrorKind> {
        errors.iter().map(|e| e.kind.clone()).collect()
    }

    #[test]
    fn test_valid_board() {
        let sessions =
            vec![Session::new("S1", d(2), t(7, 30), t(8, 25)).with_instructor("I1", "ANA")];
        let activities = vec![InstructorActivity::new(
            "A1",
            "I2",
            d(2),
            Shift::Morning,
            ActivityCode::Pl,
            4.0,
        )];
        assert!(
            validate_board(&sessions, &sample_instructors(), &activities, &[sample_course()])
                .is_ok()
        );
        assert!(validate_board(&[], &[], &[], &[]).is_ok());
    }

    #[test]
    fn test_duplicate_ids() {
        let instructors = vec![Instructor::new("I1", "ANA"), Instructor::new("I1", "ANA")];
        let courses = vec![sample_course(), sample_course()];

        let errors = validate_board(&[], &instructors, &[], &courses).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors
            .iter()
            .all(|e| e.kind == ValidationErrorKind::DuplicateId));
        assert!(errors.iter().any(|e| e.message.contains("instructor")));
        assert!(errors.iter().any(|e| e.message.contains("course")));
    }

    #[test]
    fn test_unknown_instructor_references() {
        let sessions =
            vec![Session::new("S1", d(2), t(7, 30), t(8, 25)).with_instructor("GHOST", "?")];
        let activities = vec![InstructorActivity::new(
            "A1",
            "NOBODY",
            d(2),
            Shift::Morning,
            ActivityCode::Pl,
            4.0,
        )];

        let errors =
            validate_board(&sessions, &sample_instructors(), &activities, &[]).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![
                ValidationErrorKind::UnknownInstructor,
                ValidationErrorKind::UnknownInstructor
            ]
        );
    }

    #[test]
    fn test_unassigned_session_is_valid() {
        let sessions = vec![Session::new("S1", d(2), t(7, 30), t(8, 25))];
        assert!(validate_board(&sessions, &[], &[], &[]).is_ok());
    }

    #[test]
    fn test_malformed_course() {
        let course = Course::new("C1", "MEC-01", d(31), d(2), t(11, 30), t(7, 30), 0);
        let errors = validate_board(&[], &[], &[], &[course]).unwrap_err();
        assert_eq!(
            kinds(&errors),
            vec![
                ValidationErrorKind::InvertedDateRange,
                ValidationErrorKind::EmptyDailyWindow,
                ValidationErrorKind::ZeroLessonDuration,
                ValidationErrorKind::EmptyCurriculum,
            ]
        );
    }

    #[test]
    fn test_inverted_session() {
        let sessions = vec![Session::new("S1", d(2), t(9, 0), t(8, 0))];
        let errors = validate_board(&sessions, &[], &[], &[]).unwrap_err();
        assert_eq!(kinds(&errors), vec![ValidationErrorKind::InvertedSession]);
    }
}
