//! Entity identifiers.
//!
//! Record sources are inconsistent about how they write foreign keys: the same
//! identifier may appear as `1` or as `"1"`. Everything is normalized to
//! [`EntityId`] when a record is deserialized, so joins inside the engine only
//! ever compare integers.

use serde::{Deserialize, Deserializer};

/// The identifier type shared by every entity kind.
pub type EntityId = u32;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(EntityId),
    Text(String),
}

impl RawId {
    fn normalize<E: serde::de::Error>(self) -> Result<EntityId, E> {
        match self {
            RawId::Number(id) => Ok(id),
            RawId::Text(text) => text
                .trim()
                .parse::<EntityId>()
                .map_err(|_| E::custom(format!("invalid identifier: {:?}", text))),
        }
    }
}

/// Deserializes an identifier written either as a number or a numeric string.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<EntityId, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer)?.normalize()
}

/// Deserializes a list of identifiers, each written as a number or a numeric string.
pub fn deserialize_ids<'de, D>(deserializer: D) -> Result<Vec<EntityId>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<RawId>::deserialize(deserializer)?
        .into_iter()
        .map(RawId::normalize)
        .collect()
}
