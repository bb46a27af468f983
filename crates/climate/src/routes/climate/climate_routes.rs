use std::{collections::BTreeMap, sync::Arc};

use axum::{extract::State, http::StatusCode, Json};
use log::error;

use crate::{reports, AppState, PrecipitationByDate};

pub(crate) fn internal_error(err: reports::Error) -> (StatusCode, String) {
    error!("error building report: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("Failed to load climate data: {}", err),
    )
}

#[utoipa::path(
    get,
    path = "/api/v1.0/precipitation",
    responses(
        (status = OK, description = "Every precipitation reading keyed by date", content_type = "application/json", body = BTreeMap<String, Vec<Option<f64>>>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read measurements")
    ))]
pub async fn precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<PrecipitationByDate>, (StatusCode, String)> {
    reports::precipitation(state.climate_db.as_ref())
        .await
        .map(Json)
        .map_err(internal_error)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/stations",
    responses(
        (status = OK, description = "Codes of every station", content_type = "application/json", body = Vec<String>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read stations")
    ))]
pub async fn stations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<String>>, (StatusCode, String)> {
    reports::stations(state.climate_db.as_ref())
        .await
        .map(Json)
        .map_err(internal_error)
}

#[utoipa::path(
    get,
    path = "/api/v1.0/tobs",
    responses(
        (status = OK, description = "Temperatures of the most active station over the last year of its data, oldest first", content_type = "application/json", body = Vec<f64>),
        (status = INTERNAL_SERVER_ERROR, description = "Failed to read measurements")
    ))]
pub async fn tobs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<f64>>, (StatusCode, String)> {
    reports::trailing_year_temperatures(state.climate_db.as_ref())
        .await
        .map(Json)
        .map_err(internal_error)
}
