use crate::{
    index_handler, precipitation, routes, stations, summary_between, summary_from, tobs,
    ClimateAccess, ClimateData,
};
use anyhow::anyhow;
use axum::{
    body::Body,
    extract::Request,
    middleware::{self, Next},
    response::IntoResponse,
    routing::get,
    Router,
};
use climate_core::{is_file, path_exists};
use hyper::{header::ACCEPT, Method};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

#[derive(Clone)]
pub struct AppState {
    pub climate_db: Arc<dyn ClimateData>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::climate::climate_routes::precipitation,
        routes::climate::climate_routes::stations,
        routes::climate::climate_routes::tobs,
        routes::climate::summary_routes::summary_between,
        routes::climate::summary_routes::summary_from,
    ),
    tags(
        (name = "climate api", description = "read-only reports over station precipitation and temperature observations")
    )
)]
struct ApiDoc;

pub async fn build_app_state(database: &str) -> Result<AppState, anyhow::Error> {
    if !path_exists(database) {
        return Err(anyhow!("database file not found: {}", database));
    }
    if !is_file(database) {
        return Err(anyhow!("database path is not a file: {}", database));
    }

    let climate_db = ClimateAccess::new(database)
        .map_err(|e| anyhow!("error preparing database access {}: {}", database, e))?;
    climate_db
        .verify_schema()
        .await
        .map_err(|e| anyhow!("error checking database {}: {}", database, e))?;

    Ok(AppState {
        climate_db: Arc::new(climate_db),
    })
}

pub fn app(app_state: AppState) -> Router {
    let api_docs = ApiDoc::openapi();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([ACCEPT])
        .allow_origin(Any);

    Router::new()
        .route("/", get(index_handler))
        .route("/api/v1.0/precipitation", get(precipitation))
        .route("/api/v1.0/stations", get(stations))
        .route("/api/v1.0/tobs", get(tobs))
        // two-segment ranges never collide with the single date route,
        // and the fixed segments above win over `{start}`
        .route("/api/v1.0/{start}/{end}", get(summary_between))
        .route("/api/v1.0/{start}", get(summary_from))
        .with_state(Arc::new(app_state))
        .layer(middleware::from_fn(log_request))
        .merge(Scalar::with_url("/docs", api_docs))
        .layer(cors)
}

async fn log_request(request: Request<Body>, next: Next) -> impl IntoResponse {
    let now = time::OffsetDateTime::now_utc();
    let path = request
        .uri()
        .path_and_query()
        .map(|p| p.as_str())
        .unwrap_or_default();
    info!(target: "http_request","new request, {} {}", request.method().as_str(), path);

    let response = next.run(request).await;
    let response_time = time::OffsetDateTime::now_utc() - now;
    info!(target: "http_response", "response, code: {}, time: {}", response.status().as_str(), response_time);

    response
}
