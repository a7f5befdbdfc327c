//! # Tests for Handlers
//!
//! This module contains unit tests for API handlers.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::handlers::health;
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

fn state_with(db: DatabaseConnection) -> State<AppState> {
    State(AppState {
        config: Arc::new(AppConfig::default()),
        db,
    })
}

#[tokio::test]
async fn test_health_reports_ok_when_database_reachable() {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("sqlite connects");
    Migrator::up(&db, None).await.expect("migrations apply");

    let (status, Json(body)) = health(state_with(db)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.database, "ok");
    assert_eq!(body.service.service, "lunchly");
    assert_eq!(body.service.version, env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_health_reports_unavailable_without_database() {
    let (status, Json(body)) = health(state_with(DatabaseConnection::default())).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body.database, "unavailable");
}

#[tokio::test]
async fn test_health_body_flattens_service_info() {
    let (_, Json(body)) = health(state_with(DatabaseConnection::default())).await;
    let json = serde_json::to_value(&body).expect("serializes");

    assert_eq!(json["service"], "lunchly");
    assert!(json.get("version").is_some());
    assert_eq!(json["database"], "unavailable");
}
