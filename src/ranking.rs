//! Candidate ranking for sessions that need an instructor.
//!
//! Every active instructor is scored by area affinity and by whether they
//! are already busy in the session's date and shift:
//!
//! ```text
//! score = (same_area ? 10 : 0) - (class_conflict ? 100 : 0) - (admin_conflict ? 50 : 0)
//! ```
//!
//! Candidates are sorted by score, highest first, keeping roster order on
//! ties. An oracle-suggested instructor is pinned to the top regardless of
//! score. Ranking never mutates anything.

use serde::{Deserialize, Serialize};

use crate::conflicts::ClassificationContext;
use crate::models::{Instructor, InstructorActivity, Session};

/// Score contributions of each heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// Bonus for an area match.
    pub same_area: i32,
    /// Penalty for another class in the same date and shift.
    pub class_conflict: i32,
    /// Penalty for an activity in the same date and shift.
    pub admin_conflict: i32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            same_area: 10,
            class_conflict: 100,
            admin_conflict: 50,
        }
    }
}

/// An instructor with the facts behind their score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredInstructor<'a> {
    pub instructor: &'a Instructor,
    pub has_class_conflict: bool,
    pub has_admin_conflict: bool,
    pub is_same_area: bool,
    /// Contract shift covers the session. Informational; not scored.
    pub is_shift_compatible: bool,
    pub score: i32,
}

/// Whether `instructor` teaches another session in the same date and shift.
pub fn has_class_conflict(
    instructor: &Instructor,
    session: &Session,
    sessions: &[Session],
) -> bool {
    ClassificationContext::new(sessions, &[], &[]).any_session_of(
        &instructor.id,
        session.date,
        session.shift,
        &session.id,
        |_| true,
    )
}

/// Whether `instructor` holds an activity in the session's date and shift.
pub fn has_admin_conflict(
    instructor: &Instructor,
    session: &Session,
    activities: &[InstructorActivity],
) -> bool {
    activities
        .iter()
        .any(|a| a.occupies(&instructor.id, session.date, session.shift))
}

/// Area affinity heuristic.
///
/// True when the instructor's area is defined and the session's curricular
/// unit name contains the area name, ignoring case. A substring test, so
/// "Electrical Installations" matches the Electrical area.
pub fn is_same_area(instructor: &Instructor, session: &Session) -> bool {
    instructor.area.is_defined()
        && session
            .curricular_unit
            .to_lowercase()
            .contains(&instructor.area.name().to_lowercase())
}

/// Scores and orders candidate instructors.
#[derive(Debug, Clone, Default)]
pub struct CandidateRanker {
    weights: ScoreWeights,
}

impl CandidateRanker {
    /// Creates a ranker with the default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the score weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Scores one instructor against the session.
    pub fn score<'a>(
        &self,
        instructor: &'a Instructor,
        session: &Session,
        sessions: &[Session],
        activities: &[InstructorActivity],
    ) -> ScoredInstructor<'a> {
        let has_class_conflict = has_class_conflict(instructor, session, sessions);
        let has_admin_conflict = has_admin_conflict(instructor, session, activities);
        let is_same_area = is_same_area(instructor, session);

        let mut score = 0;
        if is_same_area {
            score += self.weights.same_area;
        }
        if has_class_conflict {
            score -= self.weights.class_conflict;
        }
        if has_admin_conflict {
            score -= self.weights.admin_conflict;
        }

        ScoredInstructor {
            instructor,
            has_class_conflict,
            has_admin_conflict,
            is_same_area,
            is_shift_compatible: instructor.work_shift.covers(session.shift),
            score,
        }
    }

    /// Ranks the active instructors for `session`.
    ///
    /// `suggested` names an instructor to pin at rank 0; an id that matches
    /// no active instructor is ignored.
    pub fn rank<'a>(
        &self,
        session: &Session,
        instructors: &'a [Instructor],
        sessions: &[Session],
        activities: &[InstructorActivity],
        suggested: Option<&str>,
    ) -> Vec<ScoredInstructor<'a>> {
        let mut ranked: Vec<ScoredInstructor<'a>> = instructors
            .iter()
            .filter(|i| i.is_active())
            .map(|i| self.score(i, session, sessions, activities))
            .collect();

        // sort_by is stable
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        if let Some(pos) =
            suggested.and_then(|id| ranked.iter().position(|c| c.instructor.id == id))
        {
            ranked[..=pos].rotate_right(1);
        }
        ranked
    }
}

/// Ranks with the default weights.
pub fn rank_candidates<'a>(
    session: &Session,
    instructors: &'a [Instructor],
    sessions: &[Session],
    activities: &[InstructorActivity],
    suggested: Option<&str>,
) -> Vec<ScoredInstructor<'a>> {
    CandidateRanker::new().rank(session, instructors, sessions, activities, suggested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityCode, Shift, TechnicalArea, WorkShift};
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
        .with_cohort("ELE-01")
        .with_unit("Electrical Installations")
    }

    fn ids(ranked: &[ScoredInstructor<'_>]) -> Vec<String> {
        ranked.iter().map(|c| c.instructor.id.clone()).collect()
    }

    #[test]
    fn test_same_area_heuristic() {
        let s = session("S", 8);
        let ele = Instructor::new("I1", "ANA").with_area(TechnicalArea::Electrical);
        let mec = Instructor::new("I2", "BIA").with_area(TechnicalArea::Mechanics);
        let undefined = Instructor::new("I3", "CAIO");
        assert!(is_same_area(&ele, &s));
        assert!(!is_same_area(&mec, &s));
        assert!(!is_same_area(&undefined, &s));
    }

    #[test]
    fn test_scores_and_order() {
        let target = session("S", 8);
        let roster = vec![
            Instructor::new("BUSY", "ANA").with_area(TechnicalArea::Electrical),
            Instructor::new("PLAIN", "BIA"),
            Instructor::new("ADMIN", "CAIO"),
            Instructor::new("AREA", "DANI").with_area(TechnicalArea::Electrical),
            Instructor::new("OFF", "EVA")
                .with_area(TechnicalArea::Electrical)
                .inactive(),
        ];
        let sessions = vec![
            target.clone(),
            session("OTHER", 9).with_instructor("BUSY", "ANA"),
        ];
        let activities = vec![InstructorActivity::new(
            "X",
            "ADMIN",
            d(),
            Shift::Morning,
            ActivityCode::Ate,
            4.0,
        )];

        let ranked = rank_candidates(&target, &roster, &sessions, &activities, None);
        assert_eq!(ids(&ranked), vec!["AREA", "PLAIN", "ADMIN", "BUSY"]);
        assert_eq!(ranked[0].score, 10);
        assert_eq!(ranked[1].score, 0);
        assert_eq!(ranked[2].score, -50);
        assert!(ranked[2].has_admin_conflict);
        assert_eq!(ranked[3].score, -90);
        assert!(ranked[3].has_class_conflict);
    }

    #[test]
    fn test_ties_keep_roster_order() {
        let target = session("S", 8);
        let roster = vec![
            Instructor::new("C", "C"),
            Instructor::new("A", "A"),
            Instructor::new("B", "B"),
        ];
        let ranked = rank_candidates(&target, &roster, &[], &[], None);
        assert_eq!(ids(&ranked), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_suggested_is_pinned() {
        let target = session("S", 8);
        let roster = vec![
            Instructor::new("AREA", "ANA").with_area(TechnicalArea::Electrical),
            Instructor::new("PLAIN", "BIA"),
            Instructor::new("ADMIN", "CAIO"),
        ];
        let activities = vec![InstructorActivity::new(
            "X",
            "ADMIN",
            d(),
            Shift::Morning,
            ActivityCode::Ate,
            4.0,
        )];

        let ranked = rank_candidates(&target, &roster, &[], &activities, Some("ADMIN"));
        assert_eq!(ids(&ranked), vec!["ADMIN", "AREA", "PLAIN"]);

        let unknown = rank_candidates(&target, &roster, &[], &activities, Some("GHOST"));
        assert_eq!(ids(&unknown), vec!["AREA", "PLAIN", "ADMIN"]);
    }

    #[test]
    fn test_custom_weights_and_shift_flag() {
        let target = session("S", 19);
        let roster = vec![
            Instructor::new("AREA", "ANA")
                .with_area(TechnicalArea::Electrical)
                .with_work_shift(WorkShift::Morning),
            Instructor::new("PLAIN", "BIA").with_work_shift(WorkShift::AfternoonEvening),
        ];
        let ranker = CandidateRanker::new().with_weights(ScoreWeights {
            same_area: 1,
            ..ScoreWeights::default()
        });
        let ranked = ranker.rank(&target, &roster, &[], &[], None);
        assert_eq!(ranked[0].score, 1);
        assert!(!ranked[0].is_shift_compatible);
        assert!(ranked[1].is_shift_compatible);
    }
}
