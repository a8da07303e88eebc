//! Lesson slot and course day generation.
//!
//! # Algorithm
//!
//! A cursor starts at the daily start time. While a full lesson still fits
//! before the daily end, a slot `[cursor, cursor + duration)` is emitted and
//! the cursor advances by the lesson duration. Right after the second
//! lesson a fixed recess is added to the cursor. A trailing window shorter
//! than one lesson is dropped.
//!
//! Course days cover every calendar day of the course except Sundays.

use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::models::{minutes_of_day, time_from_minutes, Course};

/// Recess length in minutes.
pub const RECESS_MINUTES: u32 = 20;

/// Ordinal of the lesson the recess follows.
pub const RECESS_AFTER_ORDINAL: u32 = 2;

/// One bookable lesson slot within a day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// 1-based position within the day.
    pub ordinal: u32,
    /// Display label ("1st lesson", "2nd lesson", ...).
    pub label: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// A block of the school day: a lesson or the recess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayBlock {
    Lesson(Slot),
    Recess {
        start_time: NaiveTime,
        end_time: NaiveTime,
    },
}

impl DayBlock {
    /// Whether this block is the recess.
    #[inline]
    pub fn is_recess(&self) -> bool {
        matches!(self, DayBlock::Recess { .. })
    }
}

/// Generates the ordered lesson slots for one day.
///
/// Returns an empty list when the duration is zero or the window cannot
/// hold a single lesson.
pub fn generate_slots(
    daily_start_time: NaiveTime,
    daily_end_time: NaiveTime,
    lesson_duration_minutes: u32,
) -> Vec<Slot> {
    generate_day_plan(daily_start_time, daily_end_time, lesson_duration_minutes)
        .into_iter()
        .filter_map(|block| match block {
            DayBlock::Lesson(slot) => Some(slot),
            DayBlock::Recess { .. } => None,
        })
        .collect()
}

/// Generates the lesson slots of a course's daily window.
pub fn course_slots(course: &Course) -> Vec<Slot> {
    generate_slots(
        course.daily_start_time,
        course.daily_end_time,
        course.lesson_duration_minutes,
    )
}

/// Generates the day as lessons interleaved with the recess block.
///
/// The recess follows lesson #2 whenever that lesson exists.
pub fn generate_day_plan(
    daily_start_time: NaiveTime,
    daily_end_time: NaiveTime,
    lesson_duration_minutes: u32,
) -> Vec<DayBlock> {
    let mut blocks = Vec::new();
    if lesson_duration_minutes == 0 {
        return blocks;
    }

    let end = minutes_of_day(daily_end_time);
    let mut cursor = minutes_of_day(daily_start_time);
    let mut ordinal = 1;

    while let Some(next) = cursor
        .checked_add(lesson_duration_minutes)
        .filter(|&next| next <= end)
    {
        let (Some(start_time), Some(end_time)) =
            (time_from_minutes(cursor), time_from_minutes(next))
        else {
            break;
        };

        blocks.push(DayBlock::Lesson(Slot {
            ordinal,
            label: lesson_label(ordinal),
            start_time,
            end_time,
        }));
        cursor = next;

        if ordinal == RECESS_AFTER_ORDINAL {
            if let Some(recess_end) = time_from_minutes(cursor + RECESS_MINUTES) {
                blocks.push(DayBlock::Recess {
                    start_time: end_time,
                    end_time: recess_end,
                });
            }
            cursor += RECESS_MINUTES;
        }
        ordinal += 1;
    }

    blocks
}

/// Enumerates course days in `[start_date, end_date]`, skipping Sundays.
///
/// Saturdays are teaching days.
pub fn generate_course_days(start_date: NaiveDate, end_date: NaiveDate) -> Vec<NaiveDate> {
    start_date
        .iter_days()
        .take_while(|d| *d <= end_date)
        .filter(|d| d.weekday() != Weekday::Sun)
        .collect()
}

fn lesson_label(ordinal: u32) -> String {
    let suffix = match (ordinal % 10, ordinal % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{ordinal}{suffix} lesson")
}
