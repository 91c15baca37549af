//! Grade model.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{EntityId, deserialize_id};

/// A score a student received on an assignment.
///
/// The score is expected to lie between zero and the assignment's total
/// points, but nothing in the engine enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grade {
    /// Unique identifier for the grade.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    /// The student who earned the grade.
    #[serde(deserialize_with = "deserialize_id")]
    pub student_id: EntityId,
    /// The assignment the grade is for.
    #[serde(deserialize_with = "deserialize_id")]
    pub assignment_id: EntityId,
    /// The points awarded.
    pub score: Decimal,
    /// The date the work was submitted.
    pub submitted_date: NaiveDate,
}
