//! Request types for the Report Engine API.
//!
//! This module defines the path and query parameters accepted by the report
//! endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::models::{DateRange, EntityId};

/// Query parameters bounding an attendance sheet.
///
/// Both values are kept as raw strings so that a malformed date does not
/// reject the request; it simply leaves that bound unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateRangeQuery {
    /// First day of the range, as `YYYY-MM-DD`.
    #[serde(default)]
    pub start_date: Option<String>,
    /// Last day of the range, as `YYYY-MM-DD`.
    #[serde(default)]
    pub end_date: Option<String>,
}

impl DateRangeQuery {
    /// Converts the query into a [`DateRange`], dropping any bound that is not
    /// a valid date.
    pub fn into_range(self) -> DateRange {
        DateRange::new(
            parse_bound(self.start_date.as_deref()),
            parse_bound(self.end_date.as_deref()),
        )
    }
}

fn parse_bound(value: Option<&str>) -> Option<NaiveDate> {
    value.and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
}

/// Parses an entity identifier taken from the request path.
///
/// Returns `None` for anything that is not a non-negative integer.
pub fn parse_entity_id(raw: &str) -> Option<EntityId> {
    raw.trim().parse().ok()
}
