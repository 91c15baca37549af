//! Attendance statistics.

use rust_decimal::Decimal;

use crate::models::{AttendanceRecord, AttendanceStatistics, AttendanceStatus};

use super::rounding::percentage;

/// Counts the records with the given status.
pub fn count_by_status(records: &[AttendanceRecord], status: AttendanceStatus) -> usize {
    records.iter().filter(|r| r.status == status).count()
}

/// Calculates the share of records marked Present as a whole-number percentage.
///
/// Late and Excused records do not count as present. Returns 0 for an empty
/// slice.
///
/// # Examples
///
/// ```
/// use report_engine::statistics::attendance_rate;
/// use report_engine::models::{AttendanceRecord, AttendanceStatus};
/// use chrono::NaiveDate;
///
/// let record = |status| AttendanceRecord {
///     id: 1,
///     student_id: 1,
///     date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
///     status,
///     notes: None,
/// };
///
/// assert_eq!(attendance_rate(&[]), 0);
/// assert_eq!(attendance_rate(&[record(AttendanceStatus::Present)]), 100);
/// assert_eq!(
///     attendance_rate(&[record(AttendanceStatus::Present), record(AttendanceStatus::Absent)]),
///     50
/// );
/// ```
pub fn attendance_rate(records: &[AttendanceRecord]) -> i64 {
    let present = count_by_status(records, AttendanceStatus::Present);
    percentage(Decimal::from(present), Decimal::from(records.len()))
}

/// Builds the attendance statistics block for a set of records.
pub fn attendance_statistics(records: &[AttendanceRecord]) -> AttendanceStatistics {
    AttendanceStatistics {
        total_days: records.len(),
        present_count: count_by_status(records, AttendanceStatus::Present),
        absent_count: count_by_status(records, AttendanceStatus::Absent),
        late_count: count_by_status(records, AttendanceStatus::Late),
        excused_count: count_by_status(records, AttendanceStatus::Excused),
        attendance_rate: attendance_rate(records),
    }
}
