use crate::helpers::{get, spawn_app, MockClimateAccess};
use axum::http::StatusCode;
use climate_api::TemperatureSummary;
use serde_json::json;
use std::sync::Arc;
use time::macros::date;

fn untouched_database() -> MockClimateAccess {
    let mut climate_db = MockClimateAccess::new();
    climate_db.expect_temperature_summary().times(0);
    climate_db
}

#[tokio::test]
async fn inverted_range_is_text_naming_both_dates() {
    let app = spawn_app(Arc::new(untouched_database()));

    let response = get(&app, "/api/v1.0/2017-08-23/2016-08-23").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.starts_with("text/plain"));
    assert_eq!(
        response.body,
        "Please enter the earlier date (2016-08-23) ahead of the later date (2017-08-23)."
    );
    assert!(serde_json::from_str::<serde_json::Value>(&response.body).is_err());
}

#[tokio::test]
async fn malformed_range_is_text_naming_dates_and_format() {
    let app = spawn_app(Arc::new(untouched_database()));

    for uri in [
        "/api/v1.0/2016-08-23/tomorrow",
        "/api/v1.0/2016-02-30/2017-08-23",
        "/api/v1.0/23-08-2016/2017-08-23",
    ] {
        let response = get(&app, uri).await;
        let mut parts = uri.trim_start_matches("/api/v1.0/").split('/');
        let (start, end) = (parts.next().unwrap(), parts.next().unwrap());

        assert_eq!(response.status, StatusCode::OK, "{}", uri);
        assert!(response.content_type.starts_with("text/plain"), "{}", uri);
        assert_eq!(
            response.body,
            format!(
                "Either the start ({}) or stop ({}) dates do not match the format 'YYYY-MM-DD'",
                start, end
            )
        );
    }
}

#[tokio::test]
async fn malformed_single_date_is_text_naming_date_and_format() {
    let app = spawn_app(Arc::new(untouched_database()));

    for start in ["17-08-01", "+2017-08-01", "2017-08-1x"] {
        let response = get(&app, &format!("/api/v1.0/{}", start)).await;

        assert_eq!(response.status, StatusCode::OK, "{}", start);
        assert!(response.content_type.starts_with("text/plain"), "{}", start);
        assert_eq!(
            response.body,
            format!(
                "The entered date ({}) does not match the format 'YYYY-MM-DD'",
                start
            )
        );
    }
}

#[tokio::test]
async fn unpadded_single_date_is_summarized() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_summary()
        .withf(|start, end| *start == date!(2017 - 08 - 01) && end.is_none())
        .times(1)
        .returning(|_, _| {
            Ok(TemperatureSummary {
                min: Some(71.0),
                avg: Some(78.5),
                max: Some(85.0),
            })
        });
    let app = spawn_app(Arc::new(climate_db));

    let response = get(&app, "/api/v1.0/2017-8-1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([71.0, 78.5, 85.0]));
}

#[tokio::test]
async fn range_summary_queries_inclusive_bounds() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_summary()
        .withf(|start, end| {
            *start == date!(2016 - 08 - 23) && *end == Some(date!(2017 - 08 - 23))
        })
        .times(1)
        .returning(|_, _| {
            Ok(TemperatureSummary {
                min: Some(58.0),
                avg: Some(74.5),
                max: Some(87.0),
            })
        });
    let app = spawn_app(Arc::new(climate_db));

    let response = get(&app, "/api/v1.0/2016-08-23/2017-08-23").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.content_type.starts_with("application/json"));
    assert_eq!(response.json(), json!([58.0, 74.5, 87.0]));
}

#[tokio::test]
async fn same_start_and_end_is_a_valid_range() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_summary()
        .withf(|start, end| *end == Some(*start))
        .times(1)
        .returning(|_, _| Ok(TemperatureSummary::default()));
    let app = spawn_app(Arc::new(climate_db));

    let response = get(&app, "/api/v1.0/2017-01-01/2017-01-01").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([null, null, null]));
}

#[tokio::test]
async fn single_date_summary_is_open_ended() {
    let mut climate_db = MockClimateAccess::new();
    climate_db
        .expect_temperature_summary()
        .withf(|start, end| *start == date!(2017 - 01 - 01) && end.is_none())
        .times(1)
        .returning(|_, _| {
            Ok(TemperatureSummary {
                min: Some(58.0),
                avg: Some(74.1),
                max: Some(87.0),
            })
        });
    let app = spawn_app(Arc::new(climate_db));

    let response = get(&app, "/api/v1.0/2017-01-01").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([58.0, 74.1, 87.0]));
}
