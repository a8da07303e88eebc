//! Scheduling-coordination domain models.
//!
//! Provides the entities every engine operates on: class sessions,
//! instructors, their non-teaching activities, and course cohorts.
//!
//! # Domain Mappings
//!
//! | u-timetable | Training center | Clinic | Field service |
//! |-------------|-----------------|--------|---------------|
//! | Course | Cohort/Class | Care program | Contract |
//! | Session | Lesson | Appointment | Visit |
//! | Instructor | Teacher | Therapist | Technician |
//! | InstructorActivity | Admin duty | Leave | Training day |

mod activity;
mod course;
mod instructor;
mod session;
mod shift;

pub use activity::{ActivityCode, InstructorActivity};
pub use course::{Course, CourseType, CurriculumUnit};
pub use instructor::{ContractType, Instructor, InstructorStatus, TechnicalArea};
pub use session::{Session, Status, ROOM_PENDING, UNIT_PENDING};
pub use shift::{parse_time, Shift, WorkShift};
pub(crate) use shift::{minutes_of_day, time_from_minutes};
