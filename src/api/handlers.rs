//! HTTP request handlers for the Report Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineResult;

use super::request::{parse_entity_id, DateRangeQuery};
use super::response::ApiErrorResponse;
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/students/:id/report-card", get(report_card_handler))
        .route("/students/:id/attendance-sheet", get(attendance_sheet_handler))
        .route("/classes/:id/report-cards", get(class_report_cards_handler))
        .route(
            "/classes/:id/attendance-sheets",
            get(class_attendance_sheets_handler),
        )
        .route("/overview", get(overview_handler))
        .route("/school", get(school_handler))
        .with_state(state)
}

/// Handler for GET /students/:id/report-card.
async fn report_card_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, student_id = %raw_id, "Processing report card request");

    let Some(student_id) = parse_entity_id(&raw_id) else {
        return invalid_id(correlation_id, &raw_id);
    };

    let result = state.service().generate_report_card(student_id).await;
    respond(correlation_id, result)
}

/// Handler for GET /students/:id/attendance-sheet.
///
/// Accepts optional `start_date` and `end_date` query parameters.
async fn attendance_sheet_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        student_id = %raw_id,
        start_date = ?query.start_date,
        end_date = ?query.end_date,
        "Processing attendance sheet request"
    );

    let Some(student_id) = parse_entity_id(&raw_id) else {
        return invalid_id(correlation_id, &raw_id);
    };

    let result = state
        .service()
        .generate_attendance_sheet(student_id, query.into_range())
        .await;
    respond(correlation_id, result)
}

/// Handler for GET /classes/:id/report-cards.
async fn class_report_cards_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, class_id = %raw_id, "Processing class report cards request");

    let Some(class_id) = parse_entity_id(&raw_id) else {
        return invalid_id(correlation_id, &raw_id);
    };

    let result = state.service().generate_class_report_cards(class_id).await;
    respond(correlation_id, result)
}

/// Handler for GET /classes/:id/attendance-sheets.
async fn class_attendance_sheets_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    Query(query): Query<DateRangeQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(
        correlation_id = %correlation_id,
        class_id = %raw_id,
        start_date = ?query.start_date,
        end_date = ?query.end_date,
        "Processing class attendance sheets request"
    );

    let Some(class_id) = parse_entity_id(&raw_id) else {
        return invalid_id(correlation_id, &raw_id);
    };

    let result = state
        .service()
        .generate_class_attendance_sheets(class_id, query.into_range())
        .await;
    respond(correlation_id, result)
}

/// Handler for GET /overview.
async fn overview_handler(State(state): State<AppState>) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing overview request");

    let result = state.service().generate_school_overview().await;
    respond(correlation_id, result)
}

/// Handler for GET /school.
async fn school_handler(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(state.school().clone()),
    )
}

/// Turns a report result into a JSON response.
fn respond<T: Serialize>(correlation_id: Uuid, result: EngineResult<T>) -> Response {
    match result {
        Ok(document) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            Json(document),
        )
            .into_response(),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Report request failed"
            );
            let api_error: ApiErrorResponse = err.into();
            (
                api_error.status,
                [(header::CONTENT_TYPE, "application/json")],
                Json(api_error.error),
            )
                .into_response()
        }
    }
}

fn invalid_id(correlation_id: Uuid, raw_id: &str) -> Response {
    warn!(correlation_id = %correlation_id, id = %raw_id, "Invalid identifier");
    let api_error = ApiErrorResponse::invalid_id(raw_id);
    (
        api_error.status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(api_error.error),
    )
        .into_response()
}
