//! HTTP API module for the Report Engine.
//!
//! This module exposes the report service as read-only JSON endpoints for
//! report cards, attendance sheets, class batches and the school overview.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::DateRangeQuery;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
