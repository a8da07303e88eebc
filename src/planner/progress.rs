//! Curriculum progress of a course.
//!
//! Allocated hours are always derived from the session collection:
//! `matching sessions x lesson duration / 60`.

use serde::{Deserialize, Serialize};

use crate::models::{Course, Session};

/// Allocation progress of one curriculum unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitProgress {
    pub unit_id: String,
    pub unit_name: String,
    /// Target workload (hours).
    pub target_hours: f64,
    /// Hours covered by sessions of the cohort for this unit.
    pub allocated_hours: f64,
    /// Rounded completion, capped at 100.
    pub percent: u32,
}

/// Computes per-unit progress for `course`.
pub fn curriculum_progress(course: &Course, sessions: &[Session]) -> Vec<UnitProgress> {
    course
        .curriculum
        .iter()
        .map(|unit| {
            let count = sessions
                .iter()
                .filter(|s| s.includes_cohort(&course.name) && s.curricular_unit == unit.name)
                .count();
            let allocated_hours = count as f64 * course.lesson_hours();
            let percent = if unit.total_hours > 0.0 {
                ((allocated_hours / unit.total_hours) * 100.0).round().min(100.0) as u32
            } else {
                0
            };
            UnitProgress {
                unit_id: unit.id.clone(),
                unit_name: unit.name.clone(),
                target_hours: unit.total_hours,
                allocated_hours,
                percent,
            }
        })
        .collect()
}

/// Rounded mean of unit percentages (0 for an empty curriculum).
pub fn overall_attainment(progress: &[UnitProgress]) -> u32 {
    if progress.is_empty() {
        return 0;
    }
    let sum: u32 = progress.iter().map(|p| p.percent).sum();
    (f64::from(sum) / progress.len() as f64).round() as u32
}
