//! Statistics calculations for the Report Engine.
//!
//! Pure functions that aggregate grade and attendance records into the
//! figures printed on reports: average grade, attendance rate, per-status
//! counts and per-grade percentages. Every figure is a deterministic function
//! of the records passed in.

mod attendance;
mod grades;
mod rounding;

pub use attendance::{attendance_rate, attendance_statistics, count_by_status};
pub use grades::{
    UNKNOWN_ASSIGNMENT_CATEGORY, UNKNOWN_ASSIGNMENT_TITLE, UNKNOWN_ASSIGNMENT_TOTAL_POINTS,
    average_grade, grade_statistics, grade_with_context,
};
pub use rounding::{percentage, round_whole};
