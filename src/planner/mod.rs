//! Course grid planning.
//!
//! Derives bookable lesson slots from a course's daily window, expands
//! manual (optionally recurring) allocations into sessions, fills empty
//! cells from oracle suggestions, and reports curriculum progress.
//!
//! # Slot policy
//!
//! Lessons are laid back to back from the daily start time; a fixed
//! 20-minute recess always follows the second lesson. Course days run
//! Monday through Saturday.

mod allocation;
mod progress;
mod slots;
mod suggestions;

pub use allocation::{
    expand_allocation, expand_keys, Allocation, AllocationOutcome, Recurrence, SlotKey,
};
pub use progress::{curriculum_progress, overall_attainment, UnitProgress};
pub use slots::{
    course_slots, generate_course_days, generate_day_plan, generate_slots, DayBlock, Slot,
    RECESS_AFTER_ORDINAL, RECESS_MINUTES,
};
pub use suggestions::{apply_batch_suggestions, empty_slots};

use rand::Rng;

/// Random identifier with the given prefix.
pub(crate) fn generate_id(prefix: &str) -> String {
    let suffix: u64 = rand::rng().random();
    format!("{prefix}-{suffix:016x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id() {
        let a = generate_id("sess");
        let b = generate_id("sess");
        assert!(a.starts_with("sess-"));
        assert_eq!(a.len(), "sess-".len() + 16);
        assert_ne!(a, b);
    }
}
