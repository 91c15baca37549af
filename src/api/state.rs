//! Application state for the Report Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::SchoolMetadata;
use crate::service::ReportService;
use crate::store::InMemoryStore;

/// Shared application state.
///
/// Holds the report service backed by the in-memory store, and the metadata
/// of the school whose records it serves.
#[derive(Clone)]
pub struct AppState {
    service: ReportService<InMemoryStore>,
    school: Arc<SchoolMetadata>,
}

impl AppState {
    /// Creates application state over the given store.
    pub fn new(store: Arc<InMemoryStore>, school: SchoolMetadata) -> Self {
        Self {
            service: ReportService::new(store),
            school: Arc::new(school),
        }
    }

    /// Returns the report service.
    pub fn service(&self) -> &ReportService<InMemoryStore> {
        &self.service
    }

    /// Returns the school metadata.
    pub fn school(&self) -> &SchoolMetadata {
        &self.school
    }
}
