//! Attendance record model and related types.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::{EntityId, deserialize_id};

/// The outcome recorded for a student on a school day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceStatus {
    /// Attended on time.
    Present,
    /// Did not attend.
    Absent,
    /// Attended but arrived late.
    Late,
    /// Did not attend, with an accepted reason.
    Excused,
}

/// A single day's attendance entry for one student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Unique identifier for the record.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    /// The student the record belongs to.
    #[serde(deserialize_with = "deserialize_id")]
    pub student_id: EntityId,
    /// The school day this record covers.
    pub date: NaiveDate,
    /// What happened on that day.
    pub status: AttendanceStatus,
    /// Optional free-text notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
