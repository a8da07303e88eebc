//! Board health indicators.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Shift share | Sessions per mapped shift, as count and percent of total |
//! | Instructor readiness | % of sessions with an instructor and status not `Pending` |
//! | Room readiness | % of sessions with a defined room |
//! | Health score | Rounded mean of both readiness values |
//! | Pending man-hours | Sessions without instructor readiness x hours per session |
//! | Conflicts | Sessions in `Conflict` or `MultiClass` |
//!
//! Metrics read the status stored on each session. Feed them classified
//! sessions (see [`PlanningBoard::metrics`](crate::board::PlanningBoard::metrics))
//! to count derived statuses.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::models::{Instructor, InstructorActivity, Session, Shift, Status};

/// Sessions falling in one shift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShiftShare {
    pub shift: Shift,
    pub count: usize,
    /// Percent of all sessions (0.0..=100.0).
    pub percent: f64,
}

/// Board-wide indicators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardMetrics {
    pub total_sessions: usize,
    /// Morning, Afternoon, Evening in that order.
    pub shifts: Vec<ShiftShare>,
    /// Busiest shift; ties go to the earlier shift. `None` without sessions.
    pub dominant_shift: Option<Shift>,
    pub instructor_readiness: u32,
    pub room_readiness: u32,
    pub health_score: u32,
    pub pending_man_hours: u32,
    /// Distinct instructor ids across sessions and activities.
    pub involved_instructors: usize,
    pub conflicts: usize,
}

fn percent_of(part: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((part as f64 / total as f64) * 100.0).round() as u32
    }
}

impl BoardMetrics {
    /// Computes the indicators.
    ///
    /// # Arguments
    /// * `sessions` - Sessions to measure.
    /// * `activities` - Activities (only their instructor ids are read).
    /// * `pending_session_hours` - Man-hours per session lacking an instructor.
    /// * `pending_room_label` - Room label that counts as no room.
    pub fn calculate(
        sessions: &[Session],
        activities: &[InstructorActivity],
        pending_session_hours: u32,
        pending_room_label: &str,
    ) -> Self {
        let total = sessions.len();

        let shifts: Vec<ShiftShare> = Shift::MAPPED
            .iter()
            .map(|&shift| {
                let count = sessions.iter().filter(|s| s.shift == shift).count();
                let percent = if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64 * 100.0
                };
                ShiftShare {
                    shift,
                    count,
                    percent,
                }
            })
            .collect();

        let dominant_shift = if total == 0 {
            None
        } else {
            // max_by_key keeps the last maximum, so scan in reverse
            shifts.iter().rev().max_by_key(|s| s.count).map(|s| s.shift)
        };

        let staffed = sessions
            .iter()
            .filter(|s| {
                s.instructor_id.as_deref().is_some_and(|id| !id.trim().is_empty())
                    && s.status != Status::Pending
            })
            .count();
        let roomed = sessions
            .iter()
            .filter(|s| s.has_room_besides(pending_room_label))
            .count();

        let instructor_readiness = percent_of(staffed, total);
        let room_readiness = percent_of(roomed, total);
        let health_score = ((instructor_readiness + room_readiness) as f64 / 2.0).round() as u32;

        let involved: HashSet<&str> = sessions
            .iter()
            .filter_map(|s| s.instructor_id.as_deref())
            .filter(|id| !id.trim().is_empty())
            .chain(activities.iter().map(|a| a.instructor_id.as_str()))
            .collect();

        let conflicts = sessions
            .iter()
            .filter(|s| matches!(s.status, Status::Conflict | Status::MultiClass))
            .count();

        Self {
            total_sessions: total,
            shifts,
            dominant_shift,
            instructor_readiness,
            room_readiness,
            health_score,
            pending_man_hours: (total - staffed) as u32 * pending_session_hours,
            involved_instructors: involved.len(),
            conflicts,
        }
    }

    /// Share of one shift.
    pub fn share(&self, shift: Shift) -> Option<&ShiftShare> {
        self.shifts.iter().find(|s| s.shift == shift)
    }
}

/// Monday through Friday days in a month (0 for an invalid month).
pub fn working_days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    first
        .iter_days()
        .take_while(|d| d.month() == month)
        .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
        .count() as u32
}

/// One instructor's workload for a month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstructorLoad {
    pub instructor_id: String,
    /// Weekly hours x weeks per month.
    pub capacity_hours: f64,
    /// Sum of session durations.
    pub taught_hours: f64,
    /// Sum of activity hours.
    pub activity_hours: f64,
    /// Capacity minus taught and activity hours; negative when overbooked.
    pub remaining_hours: f64,
    /// Per mapped shift: percent of working days with at least one session.
    pub occupancy: Vec<(Shift, u32)>,
}

impl InstructorLoad {
    /// Computes the load of `instructor` for `year`-`month`.
    pub fn calculate(
        instructor: &Instructor,
        sessions: &[Session],
        activities: &[InstructorActivity],
        year: i32,
        month: u32,
        weeks_per_month: u32,
    ) -> Self {
        let in_month = |d: NaiveDate| d.year() == year && d.month() == month;

        let taught: Vec<&Session> = sessions
            .iter()
            .filter(|s| {
                s.instructor_id.as_deref() == Some(instructor.id.as_str()) && in_month(s.date)
            })
            .collect();
        let taught_hours: f64 = taught.iter().map(|s| s.duration_minutes() as f64 / 60.0).sum();
        let activity_hours: f64 = activities
            .iter()
            .filter(|a| a.instructor_id == instructor.id && in_month(a.date))
            .map(|a| a.hours)
            .sum();
        let capacity_hours = instructor.weekly_hours * f64::from(weeks_per_month);

        let working_days = working_days_in_month(year, month) as usize;
        let occupancy = Shift::MAPPED
            .iter()
            .map(|&shift| {
                let days: HashSet<NaiveDate> = taught
                    .iter()
                    .filter(|s| s.shift == shift)
                    .map(|s| s.date)
                    .collect();
                (shift, percent_of(days.len(), working_days))
            })
            .collect();

        Self {
            instructor_id: instructor.id.clone(),
            capacity_hours,
            taught_hours,
            activity_hours,
            remaining_hours: capacity_hours - taught_hours - activity_hours,
            occupancy,
        }
    }

    /// Occupancy percent for one shift.
    pub fn occupancy_of(&self, shift: Shift) -> u32 {
        self.occupancy
            .iter()
            .find(|(s, _)| *s == shift)
            .map(|(_, p)| *p)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActivityCode, ROOM_PENDING};
    use chrono::NaiveTime;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn session(id: &str, day: u32, hour: u32) -> Session {
        Session::new(
            id,
            d(day),
            NaiveTime::from_hms_opt(hour, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(hour + 1, 0, 0).unwrap(),
        )
        .with_cohort("MEC-01")
    }

    #[test]
    fn test_empty_board() {
        let m = BoardMetrics::calculate(&[], &[], 4, ROOM_PENDING);
        assert_eq!(m.total_sessions, 0);
        assert_eq!(m.dominant_shift, None);
        assert_eq!(m.health_score, 0);
        assert_eq!(m.pending_man_hours, 0);
        assert!(m.shifts.iter().all(|s| s.percent == 0.0));
    }

    #[test]
    fn test_board_metrics() {
        let sessions = vec![
            session("S1", 2, 8).with_instructor("I1", "ANA").with_room("LAB 1"),
            session("S2", 2, 9)
                .with_instructor("I2", "BIA")
                .with_room("ROOM PENDING")
                .with_status(Status::Conflict),
            session("S3", 2, 19).with_status(Status::Pending).with_room("LAB 2"),
            session("S4", 3, 14)
                .with_instructor("I1", "ANA")
                .with_status(Status::MultiClass),
        ];
        let activities = vec![InstructorActivity::new(
            "A1",
            "I9",
            d(2),
            Shift::Morning,
            ActivityCode::Ate,
            4.0,
        )];

        let m = BoardMetrics::calculate(&sessions, &activities, 4, ROOM_PENDING);
        assert_eq!(m.total_sessions, 4);
        assert_eq!(m.share(Shift::Morning).unwrap().count, 2);
        assert_eq!(m.share(Shift::Afternoon).unwrap().percent, 25.0);
        assert_eq!(m.dominant_shift, Some(Shift::Morning));
        assert_eq!(m.instructor_readiness, 75);
        assert_eq!(m.room_readiness, 50);
        assert_eq!(m.health_score, 63);
        assert_eq!(m.pending_man_hours, 4);
        assert_eq!(m.involved_instructors, 3);
        assert_eq!(m.conflicts, 2);
    }

    #[test]
    fn test_blank_instructor_and_custom_room_label() {
        let mut blank = session("S1", 2, 8).with_room("LAB 1");
        blank.instructor_id = Some("  ".to_string());
        let sessions = vec![
            blank,
            session("S2", 2, 9).with_instructor("I1", "ANA").with_room("TBD"),
        ];

        let m = BoardMetrics::calculate(&sessions, &[], 4, "TBD");
        assert_eq!(m.instructor_readiness, 50);
        assert_eq!(m.room_readiness, 50);
        assert_eq!(m.pending_man_hours, 4);
        assert_eq!(m.involved_instructors, 1);
    }

    #[test]
    fn test_dominant_tie_goes_to_earlier_shift() {
        let sessions = vec![session("S1", 2, 19), session("S2", 2, 14)];
        let m = BoardMetrics::calculate(&sessions, &[], 4, ROOM_PENDING);
        assert_eq!(m.dominant_shift, Some(Shift::Afternoon));
    }

    #[test]
    fn test_working_days() {
        // March 2026 starts on a Sunday.
        assert_eq!(working_days_in_month(2026, 3), 22);
        assert_eq!(working_days_in_month(2026, 2), 20);
        assert_eq!(working_days_in_month(2026, 13), 0);
    }

    #[test]
    fn test_instructor_load() {
        let ana = Instructor::new("I1", "ANA").with_weekly_hours(20.0);
        let sessions = vec![
            session("S1", 2, 8).with_instructor("I1", "ANA"),
            session("S2", 2, 9).with_instructor("I1", "ANA"),
            session("S3", 3, 19).with_instructor("I1", "ANA"),
            session("S4", 3, 8).with_instructor("I2", "BIA"),
        ];
        let activities = vec![
            InstructorActivity::new("A1", "I1", d(4), Shift::Morning, ActivityCode::Pl, 4.0),
            InstructorActivity::new(
                "A2",
                "I1",
                NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
                Shift::Morning,
                ActivityCode::Pl,
                4.0,
            ),
        ];

        let load = InstructorLoad::calculate(&ana, &sessions, &activities, 2026, 3, 4);
        assert_eq!(load.capacity_hours, 80.0);
        assert_eq!(load.taught_hours, 3.0);
        assert_eq!(load.activity_hours, 4.0);
        assert_eq!(load.remaining_hours, 73.0);
        // 1 day of 22.
        assert_eq!(load.occupancy_of(Shift::Morning), 5);
        assert_eq!(load.occupancy_of(Shift::Afternoon), 0);
    }
}
