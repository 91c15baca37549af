//! Core data models for the Report Engine.
//!
//! This module contains the school records consumed by the engine and the
//! report documents it produces.

mod assignment;
mod attendance;
mod class;
mod grade;
mod id;
mod report;
mod student;

pub use assignment::Assignment;
pub use attendance::{AttendanceRecord, AttendanceStatus};
pub use class::Class;
pub use grade::Grade;
pub use id::{EntityId, deserialize_id, deserialize_ids};
pub use report::{
    AttendanceSheet, AttendanceStatistics, ClassAttendanceSheets, ClassReportCards, DateRange,
    GradeStatistics, GradeWithContext, LetterGrade, ReportCard, ReportCardStatistics,
    SchoolOverview,
};
pub use student::{Student, StudentStatus};
