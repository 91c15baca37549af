//! Report document models for the Report Engine.
//!
//! This module contains the composed documents handed to the printing
//! collaborator: [`ReportCard`], [`AttendanceSheet`] and their class-level
//! batches, together with the statistics blocks embedded in them. Documents
//! are recomputed on every request and never persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AttendanceRecord, Class, Grade, Student};

/// Letter grade on the school's grading scale.
///
/// # Example
///
/// ```
/// use report_engine::models::LetterGrade;
///
/// assert_eq!(LetterGrade::from_percentage(91), LetterGrade::AMinus);
/// assert_eq!(LetterGrade::from_percentage(64).to_string(), "F");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    /// 97 and above.
    #[serde(rename = "A+")]
    APlus,
    /// 93 to 96.
    #[serde(rename = "A")]
    A,
    /// 90 to 92.
    #[serde(rename = "A-")]
    AMinus,
    /// 87 to 89.
    #[serde(rename = "B+")]
    BPlus,
    /// 83 to 86.
    #[serde(rename = "B")]
    B,
    /// 80 to 82.
    #[serde(rename = "B-")]
    BMinus,
    /// 77 to 79.
    #[serde(rename = "C+")]
    CPlus,
    /// 73 to 76.
    #[serde(rename = "C")]
    C,
    /// 70 to 72.
    #[serde(rename = "C-")]
    CMinus,
    /// 67 to 69.
    #[serde(rename = "D+")]
    DPlus,
    /// 65 and 66.
    #[serde(rename = "D")]
    D,
    /// Below 65.
    #[serde(rename = "F")]
    F,
}

impl LetterGrade {
    /// Maps a whole-number percentage onto the grading scale.
    pub fn from_percentage(percentage: i64) -> Self {
        match percentage {
            p if p >= 97 => LetterGrade::APlus,
            p if p >= 93 => LetterGrade::A,
            p if p >= 90 => LetterGrade::AMinus,
            p if p >= 87 => LetterGrade::BPlus,
            p if p >= 83 => LetterGrade::B,
            p if p >= 80 => LetterGrade::BMinus,
            p if p >= 77 => LetterGrade::CPlus,
            p if p >= 73 => LetterGrade::C,
            p if p >= 70 => LetterGrade::CMinus,
            p if p >= 67 => LetterGrade::DPlus,
            p if p >= 65 => LetterGrade::D,
            _ => LetterGrade::F,
        }
    }

    /// The printed form of the grade.
    pub fn as_str(&self) -> &'static str {
        match self {
            LetterGrade::APlus => "A+",
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::F => "F",
        }
    }
}

impl std::fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A grade enriched with the metadata of the assignment it was awarded for.
///
/// When the referenced assignment cannot be found the placeholder values
/// ("Unknown Assignment", category "Assignment", 100 points) are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeWithContext {
    /// The underlying grade record.
    #[serde(flatten)]
    pub grade: Grade,
    /// Title of the assignment.
    pub assignment_title: String,
    /// Category of the assignment.
    pub category: String,
    /// Maximum points available on the assignment.
    pub total_points: Decimal,
    /// Score as a whole-number percentage of the total points.
    pub percentage: i64,
    /// Letter grade for the percentage.
    pub letter_grade: LetterGrade,
}

/// Summary statistics over a collection of grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeStatistics {
    /// Number of grades.
    pub total_grades: usize,
    /// Mean score rounded to a whole number (0 when there are no grades).
    pub average_grade: i64,
}

/// Summary statistics over a collection of attendance records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceStatistics {
    /// Number of records.
    pub total_days: usize,
    /// Records marked Present.
    pub present_count: usize,
    /// Records marked Absent.
    pub absent_count: usize,
    /// Records marked Late.
    pub late_count: usize,
    /// Records marked Excused.
    pub excused_count: usize,
    /// Present records as a whole-number percentage of all records.
    pub attendance_rate: i64,
}

/// The statistics block printed on a report card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCardStatistics {
    /// Number of grades on record.
    pub total_grades: usize,
    /// Mean score rounded to a whole number.
    pub average_grade: i64,
    /// Present records as a whole-number percentage of all records.
    pub attendance_rate: i64,
    /// Records marked Present.
    pub present_count: usize,
    /// Number of attendance records.
    pub total_attendance: usize,
}

impl ReportCardStatistics {
    /// Combines grade and attendance statistics into a report card block.
    pub fn combine(grades: GradeStatistics, attendance: AttendanceStatistics) -> Self {
        Self {
            total_grades: grades.total_grades,
            average_grade: grades.average_grade,
            attendance_rate: attendance.attendance_rate,
            present_count: attendance.present_count,
            total_attendance: attendance.total_days,
        }
    }
}

/// An optional inclusive date range used to bound an attendance sheet.
///
/// Filtering only applies when both bounds are present; a range with a
/// single bound behaves like no range at all.
///
/// # Example
///
/// ```
/// use report_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
///
/// let range = DateRange::new(Some(start), Some(end));
/// assert!(range.contains(start));
/// assert!(range.contains(end));
/// assert!(!range.contains(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap()));
///
/// let open = DateRange::new(Some(start), None);
/// assert!(open.contains(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day of the range (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Last day of the range (inclusive).
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    /// Creates a range from optional bounds.
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// A range that retains every record.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Returns both bounds when the range actually filters.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }

    /// Checks whether a date is retained by this range.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match self.bounds() {
            Some((start, end)) => date >= start && date <= end,
            None => true,
        }
    }
}

/// A student's report card: grades and attendance over all recorded history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCard {
    /// The student the report is for.
    pub student: Student,
    /// Every grade, enriched with assignment metadata.
    pub grades: Vec<GradeWithContext>,
    /// Every attendance record, in store order.
    pub attendance: Vec<AttendanceRecord>,
    /// Statistics over the grades and attendance above.
    pub statistics: ReportCardStatistics,
}

/// A student's attendance sheet, optionally bounded by a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSheet {
    /// The student the sheet is for.
    pub student: Student,
    /// Records within the range, most recent first.
    pub attendance: Vec<AttendanceRecord>,
    /// Statistics over exactly the records above.
    pub statistics: AttendanceStatistics,
    /// The range that was requested, echoed back.
    pub date_range: DateRange,
}

/// Report cards for every student enrolled in a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassReportCards {
    /// The class the batch is for.
    pub class: Class,
    /// One report card per enrolled student, in roster order.
    pub report_cards: Vec<ReportCard>,
}

/// Attendance sheets for every student enrolled in a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAttendanceSheets {
    /// The class the batch is for.
    pub class: Class,
    /// One attendance sheet per enrolled student, in roster order.
    pub attendance_sheets: Vec<AttendanceSheet>,
}

/// School-wide headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolOverview {
    /// Number of students on the roster.
    pub total_students: usize,
    /// Number of classes.
    pub active_classes: usize,
    /// Mean score over every grade.
    pub average_grade: i64,
    /// Present records as a percentage of every attendance record.
    pub attendance_rate: i64,
}
