//! Student model and related types.
//!
//! This module defines the [`Student`] struct and [`StudentStatus`] enum
//! for representing enrolled pupils.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::id::{EntityId, deserialize_id, deserialize_ids};

/// Represents a student's enrollment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StudentStatus {
    /// Currently enrolled and attending.
    Active,
    /// Enrolled but not currently attending.
    Inactive,
    /// Completed their studies.
    Graduated,
    /// Moved to another school.
    Transferred,
}

/// Represents a student on the school roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique identifier for the student.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    /// The student's first name.
    pub first_name: String,
    /// The student's last name.
    pub last_name: String,
    /// Contact email address.
    pub email: String,
    /// The grade level the student is in (e.g., 10).
    pub grade_level: u8,
    /// The date the student enrolled.
    pub enrollment_date: NaiveDate,
    /// The student's enrollment status.
    pub status: StudentStatus,
    /// Classes the student is enrolled in.
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub class_ids: Vec<EntityId>,
}

impl Student {
    /// Returns the student's name as "First Last".
    ///
    /// # Examples
    ///
    /// ```
    /// use report_engine::models::{Student, StudentStatus};
    /// use chrono::NaiveDate;
    ///
    /// let student = Student {
    ///     id: 1,
    ///     first_name: "Emma".to_string(),
    ///     last_name: "Wilson".to_string(),
    ///     email: "emma.wilson@school.edu".to_string(),
    ///     grade_level: 10,
    ///     enrollment_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
    ///     status: StudentStatus::Active,
    ///     class_ids: vec![1, 2],
    /// };
    /// assert_eq!(student.full_name(), "Emma Wilson");
    /// assert!(student.is_enrolled_in(2));
    /// ```
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Returns true if the student's class list contains `class_id`.
    pub fn is_enrolled_in(&self, class_id: EntityId) -> bool {
        self.class_ids.contains(&class_id)
    }

    /// Returns true if `query` appears in the student's first name, last name
    /// or email, ignoring case.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.first_name.to_lowercase().contains(&needle)
            || self.last_name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
    }
}
