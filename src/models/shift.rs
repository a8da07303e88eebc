//! Shift bands and contract shift coverage.
//!
//! A session's [`Shift`] is derived from its start time. An instructor's
//! [`WorkShift`] describes which of those bands the contract covers.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Time-of-day band a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shift {
    /// 05:00 to 11:59.
    #[serde(alias = "Manhã")]
    Morning,
    /// 12:00 to 17:59.
    #[serde(alias = "Tarde")]
    Afternoon,
    /// 18:00 to 23:59.
    #[serde(alias = "Noite")]
    Evening,
    /// Start time outside every known band.
    #[serde(alias = "Não Mapeado")]
    Unmapped,
}

impl Shift {
    /// The three mapped bands, in chronological order.
    pub const MAPPED: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Evening];

    /// Resolves the band for a start time.
    pub fn from_start_time(start: NaiveTime) -> Self {
        match start.hour() {
            5..=11 => Shift::Morning,
            12..=17 => Shift::Afternoon,
            18..=23 => Shift::Evening,
            _ => Shift::Unmapped,
        }
    }

    /// Whether this is one of the three mapped bands.
    #[inline]
    pub fn is_mapped(self) -> bool {
        self != Shift::Unmapped
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Evening => "Evening",
            Shift::Unmapped => "Unmapped",
        };
        f.write_str(label)
    }
}

/// Shift coverage of an instructor's contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkShift {
    #[serde(alias = "Matutino")]
    Morning,
    #[serde(alias = "Vespertino")]
    Afternoon,
    #[serde(alias = "Noturno")]
    Evening,
    #[default]
    #[serde(alias = "Matutino/Vespertino")]
    MorningAfternoon,
    #[serde(alias = "Vespertino/Noturno")]
    AfternoonEvening,
}

impl WorkShift {
    /// Session shifts this contract may teach.
    pub fn allowed_shifts(self) -> &'static [Shift] {
        match self {
            WorkShift::Morning => &[Shift::Morning],
            WorkShift::Afternoon => &[Shift::Afternoon],
            WorkShift::Evening => &[Shift::Evening],
            WorkShift::MorningAfternoon => &[Shift::Morning, Shift::Afternoon],
            WorkShift::AfternoonEvening => &[Shift::Afternoon, Shift::Evening],
        }
    }

    /// Whether a session in `shift` is covered by this contract.
    #[inline]
    pub fn covers(self, shift: Shift) -> bool {
        self.allowed_shifts().contains(&shift)
    }
}

impl fmt::Display for WorkShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WorkShift::Morning => "Morning",
            WorkShift::Afternoon => "Afternoon",
            WorkShift::Evening => "Evening",
            WorkShift::MorningAfternoon => "Morning/Afternoon",
            WorkShift::AfternoonEvening => "Afternoon/Evening",
        };
        f.write_str(label)
    }
}

/// Parses a `"HH:MM"` time of day.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M")
        .map_err(|_| PlannerError::InvalidTime(value.to_string()))
}

/// Minutes elapsed since midnight.
#[inline]
pub(crate) fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Time of day for a minute offset; `None` past 23:59.
#[inline]
pub(crate) fn time_from_minutes(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}
