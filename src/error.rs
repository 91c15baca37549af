//! Error types for the Report Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading school records
//! and composing reports.

use std::fmt;

use thiserror::Error;

use crate::models::EntityId;

/// The report operations exposed by the [`ReportService`](crate::service::ReportService).
///
/// Used to prefix failures with the name of the operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportOperation {
    /// A single student's report card.
    ReportCard,
    /// A single student's attendance sheet.
    AttendanceSheet,
    /// Report cards for every student in a class.
    ClassReportCards,
    /// Attendance sheets for every student in a class.
    ClassAttendanceSheets,
    /// The school-wide overview.
    SchoolOverview,
}

impl fmt::Display for ReportOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportOperation::ReportCard => "report card",
            ReportOperation::AttendanceSheet => "attendance sheet",
            ReportOperation::ClassReportCards => "class report cards",
            ReportOperation::ClassAttendanceSheets => "class attendance sheets",
            ReportOperation::SchoolOverview => "school overview",
        };
        f.write_str(name)
    }
}

/// The main error type for the Report Engine.
///
/// # Example
///
/// ```
/// use report_engine::error::EngineError;
///
/// let error = EngineError::StudentNotFound { id: 9999 };
/// assert_eq!(error.to_string(), "Student not found: 9999");
/// assert!(error.is_not_found());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// No student exists with the requested identifier.
    #[error("Student not found: {id}")]
    StudentNotFound {
        /// The identifier that was not found.
        id: EntityId,
    },

    /// No class exists with the requested identifier.
    #[error("Class not found: {id}")]
    ClassNotFound {
        /// The identifier that was not found.
        id: EntityId,
    },

    /// No assignment exists with the requested identifier.
    #[error("Assignment not found: {id}")]
    AssignmentNotFound {
        /// The identifier that was not found.
        id: EntityId,
    },

    /// No grade exists with the requested identifier.
    #[error("Grade not found: {id}")]
    GradeNotFound {
        /// The identifier that was not found.
        id: EntityId,
    },

    /// No attendance record exists with the requested identifier.
    #[error("Attendance record not found: {id}")]
    AttendanceNotFound {
        /// The identifier that was not found.
        id: EntityId,
    },

    /// A record accessor failed for reasons outside the engine.
    #[error("Record store unavailable: {message}")]
    StoreUnavailable {
        /// A description of the failure.
        message: String,
    },

    /// No identifier is left to assign to a new record.
    #[error("Cannot create {kind}: identifiers exhausted")]
    IdentifiersExhausted {
        /// The kind of record being created.
        kind: &'static str,
    },

    /// A per-student composition task panicked or was cancelled.
    #[error("Report task failed: {message}")]
    TaskFailed {
        /// A description of the failure.
        message: String,
    },

    /// A data file was not found at the specified path.
    #[error("Data file not found: {path}")]
    DataNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A data file could not be parsed.
    #[error("Failed to parse data file '{path}': {message}")]
    DataParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A report operation failed; wraps the underlying cause.
    #[error("Failed to generate {operation}: {source}")]
    ReportFailed {
        /// The operation that failed.
        operation: ReportOperation,
        /// The underlying error.
        #[source]
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// Wraps this error with the name of the report operation that failed.
    pub fn in_operation(self, operation: ReportOperation) -> Self {
        EngineError::ReportFailed {
            operation,
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, looking through `ReportFailed` wrappers.
    pub fn root_cause(&self) -> &EngineError {
        match self {
            EngineError::ReportFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Returns true if the root cause is a missing record.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self.root_cause(),
            EngineError::StudentNotFound { .. }
                | EngineError::ClassNotFound { .. }
                | EngineError::AssignmentNotFound { .. }
                | EngineError::GradeNotFound { .. }
                | EngineError::AttendanceNotFound { .. }
        )
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
