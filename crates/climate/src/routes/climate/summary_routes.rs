use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::info;

use super::climate_routes::internal_error;
use crate::{reports, AppState, DateRange, RangeError};

// Unreadable or inverted dates are answered with 200 and a plain text message
fn rejected(err: RangeError) -> Response {
    info!("rejected summary request: {}", err);
    err.to_string().into_response()
}

async fn summarize(
    state: &AppState,
    range: DateRange,
) -> Result<Response, (StatusCode, String)> {
    let summary = reports::temperature_summary(state.climate_db.as_ref(), range)
        .await
        .map_err(internal_error)?;
    Ok(Json(summary).into_response())
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}/{end}",
    params(
        ("start" = String, Path, description = "First day of the range, YYYY-MM-DD"),
        ("end" = String, Path, description = "Last day of the range, YYYY-MM-DD, inclusive"),
    ),
    responses(
        (status = OK, description = "[min, avg, max] temperature in range, or a text message for unreadable or inverted dates", content_type = "application/json", body = Vec<Option<f64>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read measurements")
    ))]
pub async fn summary_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Response, (StatusCode, String)> {
    match DateRange::between(&start, &end) {
        Ok(range) => summarize(&state, range).await,
        Err(err) => Ok(rejected(err)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1.0/{start}",
    params(
        ("start" = String, Path, description = "First day to include, YYYY-MM-DD"),
    ),
    responses(
        (status = OK, description = "[min, avg, max] temperature from the date onward, or a text message for an unreadable date", content_type = "application/json", body = Vec<Option<f64>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read measurements")
    ))]
pub async fn summary_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    match DateRange::starting(&start) {
        Ok(range) => summarize(&state, range).await,
        Err(err) => Ok(rejected(err)),
    }
}
