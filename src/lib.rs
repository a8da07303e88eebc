//! Timetable coordination for training centers.
//!
//! Plans class sessions for course cohorts, assigns instructors and rooms,
//! and surfaces every incomplete or conflicting session as a pendency
//! instead of rejecting it.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Session`, `Instructor`, `InstructorActivity`,
//!   `Course`, `Shift`, `WorkShift`, `Status`
//! - **`planner`**: Slot generation, allocation expansion (with weekly
//!   recurrence), oracle-assisted slot filling, curriculum progress
//! - **`conflicts`**: Rule-based session classification and pendency review
//! - **`ranking`**: Candidate instructor scoring
//! - **`oracle`**: Suggestion service boundary (`SuggestionOracle`)
//! - **`board`**: `PlanningBoard`, the single owner of all collections
//! - **`metrics`**: Board health indicators and instructor workload
//! - **`validation`**: Integrity checks (duplicate IDs, dangling references)
//! - **`config`** / **`audit`** / **`error`**: Ambient plumbing
//!
//! # Architecture
//!
//! The engines in `planner`, `conflicts` and `ranking` are pure functions
//! over immutable slices. Session status is never trusted as stored: the
//! classifier recomputes it from the full session, instructor and activity
//! collections on every read.

pub mod audit;
pub mod board;
pub mod config;
pub mod conflicts;
pub mod error;
pub mod metrics;
pub mod models;
pub mod oracle;
pub mod planner;
pub mod ranking;
pub mod validation;

pub use board::{AllocationRequest, PlanningBoard};
pub use config::PlannerConfig;
pub use error::{PlannerError, Result};
