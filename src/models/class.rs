//! Class model.

use serde::{Deserialize, Serialize};

use super::id::{EntityId, deserialize_id, deserialize_ids};

/// A taught class (a subject in a given period).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    /// Unique identifier for the class.
    #[serde(deserialize_with = "deserialize_id")]
    pub id: EntityId,
    /// Display name (e.g., "Biology 101").
    pub name: String,
    /// The subject taught (e.g., "Science").
    pub subject: String,
    /// The timetable period (e.g., "Period 2").
    pub period: String,
    /// Students on the class roster.
    #[serde(default, deserialize_with = "deserialize_ids")]
    pub student_ids: Vec<EntityId>,
}
