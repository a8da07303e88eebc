//! Course (cohort) model.
//!
//! A course is a named cohort following a curriculum over a date range,
//! within a fixed daily time window split into lessons.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::{Shift, TechnicalArea};

/// Kind of course offering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseType {
    #[default]
    #[serde(alias = "Habilitação Técnica")]
    Technical,
    #[serde(alias = "Aprendizagem Industrial Básica")]
    BasicApprenticeship,
    #[serde(alias = "Aprendizagem Industrial Técnica")]
    TechnicalApprenticeship,
    #[serde(alias = "Aperfeiçoamento")]
    Improvement,
    #[serde(alias = "Qualificação")]
    Qualification,
    #[serde(alias = "Iniciação Profissional")]
    ProfessionalInitiation,
}

/// A subject within a course's curriculum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumUnit {
    pub id: String,
    pub name: String,
    /// Target workload in hours.
    pub total_hours: f64,
}

impl CurriculumUnit {
    /// Creates a curriculum unit.
    pub fn new(id: impl Into<String>, name: impl Into<String>, total_hours: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            total_hours,
        }
    }
}

/// A class cohort with its curriculum and daily window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: String,
    /// Cohort name; sessions reference the course through it.
    pub name: String,
    pub area: TechnicalArea,
    pub course_type: CourseType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub shift: Shift,
    pub daily_start_time: NaiveTime,
    pub daily_end_time: NaiveTime,
    pub lesson_duration_minutes: u32,
    /// Ordered curriculum.
    pub curriculum: Vec<CurriculumUnit>,
}

impl Course {
    /// Creates a course; the shift is derived from the daily start time.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start_date: NaiveDate,
        end_date: NaiveDate,
        daily_start_time: NaiveTime,
        daily_end_time: NaiveTime,
        lesson_duration_minutes: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            area: TechnicalArea::Undefined,
            course_type: CourseType::Technical,
            start_date,
            end_date,
            shift: Shift::from_start_time(daily_start_time),
            daily_start_time,
            daily_end_time,
            lesson_duration_minutes,
            curriculum: Vec::new(),
        }
    }

    /// Sets the technical area.
    pub fn with_area(mut self, area: TechnicalArea) -> Self {
        self.area = area;
        self
    }

    /// Sets the course type.
    pub fn with_type(mut self, course_type: CourseType) -> Self {
        self.course_type = course_type;
        self
    }

    /// Overrides the derived shift.
    pub fn with_shift(mut self, shift: Shift) -> Self {
        self.shift = shift;
        self
    }

    /// Appends a curriculum unit.
    pub fn with_unit(mut self, unit: CurriculumUnit) -> Self {
        self.curriculum.push(unit);
        self
    }

    /// Finds a curriculum unit by id.
    pub fn unit(&self, unit_id: &str) -> Option<&CurriculumUnit> {
        self.curriculum.iter().find(|u| u.id == unit_id)
    }

    /// Lesson length in hours.
    #[inline]
    pub fn lesson_hours(&self) -> f64 {
        f64::from(self.lesson_duration_minutes) / 60.0
    }

    /// Total curriculum workload in hours.
    pub fn total_hours(&self) -> f64 {
        self.curriculum.iter().map(|u| u.total_hours).sum()
    }
}
