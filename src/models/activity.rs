//! Non-teaching instructor commitments.
//!
//! An activity (administrative work, leave, project time) occupies a whole
//! date + shift slot for its instructor.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Shift;

/// Kind of non-teaching commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActivityCode {
    Ate,
    Cel,
    Ddn,
    Ddr,
    Fer,
    Ist,
    Nem,
    Out,
    Sen,
    #[serde(rename = "T&D")]
    Td,
    Pl,
    Proj,
}

impl fmt::Display for ActivityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ActivityCode::Ate => "ATE",
            ActivityCode::Cel => "CEL",
            ActivityCode::Ddn => "DDN",
            ActivityCode::Ddr => "DDR",
            ActivityCode::Fer => "FER",
            ActivityCode::Ist => "IST",
            ActivityCode::Nem => "NEM",
            ActivityCode::Out => "OUT",
            ActivityCode::Sen => "SEN",
            ActivityCode::Td => "T&D",
            ActivityCode::Pl => "PL",
            ActivityCode::Proj => "PROJ",
        };
        f.write_str(code)
    }
}

/// An instructor's non-teaching commitment on one date + shift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructorActivity {
    pub id: String,
    pub instructor_id: String,
    pub date: NaiveDate,
    pub shift: Shift,
    pub code: ActivityCode,
    pub hours: f64,
}

impl InstructorActivity {
    /// Creates an activity.
    pub fn new(
        id: impl Into<String>,
        instructor_id: impl Into<String>,
        date: NaiveDate,
        shift: Shift,
        code: ActivityCode,
        hours: f64,
    ) -> Self {
        Self {
            id: id.into(),
            instructor_id: instructor_id.into(),
            date,
            shift,
            code,
            hours,
        }
    }

    /// Whether this activity blocks `instructor_id` on `date` during `shift`.
    #[inline]
    pub fn occupies(&self, instructor_id: &str, date: NaiveDate, shift: Shift) -> bool {
        self.instructor_id == instructor_id && self.date == date && self.shift == shift
    }
}
