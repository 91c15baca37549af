//! Assignment model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{EntityId, deserialize_id};

/// A piece of assessed work set for a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Unique identifier for the assignment.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    /// The assignment title (e.g., "Lab Report").
    pub title: String,
    /// The assignment category (e.g., "Homework", "Test").
    pub category: String,
    /// The date the assignment is due.
    pub due_date: NaiveDate,
    /// The maximum score available.
    pub total_points: Decimal,
    /// The class this assignment belongs to.
    #[serde(deserialize_with = "deserialize_id")]
    pub class_id: EntityId,
}
