//! Test utilities for database and router testing.
//!
//! This module provides utilities for setting up in-memory SQLite databases
//! with migrations, inserting fixture rows, and building the application
//! router around them.

use std::sync::Arc;

use anyhow::Result;
use axum::{Router, body::Body, http::Request, response::Response};
use chrono::NaiveDateTime;
use lunchly::{
    config::AppConfig,
    models::{customer, reservation},
    server::{AppState, create_app},
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ActiveValue::Set, Database, DatabaseConnection};
use tower::ServiceExt;

/// Sets up an in-memory SQLite database with all migrations applied.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}

/// Builds the application router over `db` with default configuration.
#[allow(dead_code)]
pub fn test_app(db: DatabaseConnection) -> Router {
    test_app_with_config(db, AppConfig::default())
}

#[allow(dead_code)]
pub fn test_app_with_config(db: DatabaseConnection, config: AppConfig) -> Router {
    create_app(AppState {
        config: Arc::new(config),
        db,
    })
}

/// Inserts a customer row directly, bypassing form validation.
#[allow(dead_code)]
pub async fn insert_customer(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
) -> Result<customer::Model> {
    let model = customer::ActiveModel {
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        phone: Set(None),
        notes: Set(String::new()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(model)
}

/// Inserts a reservation row for `customer_id`.
#[allow(dead_code)]
pub async fn insert_reservation(
    db: &DatabaseConnection,
    customer_id: i32,
    num_guests: i32,
    start_at: &str,
    notes: &str,
) -> Result<reservation::Model> {
    let start_at = NaiveDateTime::parse_from_str(start_at, "%Y-%m-%d %H:%M")?;

    let model = reservation::ActiveModel {
        customer_id: Set(customer_id),
        num_guests: Set(num_guests),
        start_at: Set(start_at),
        notes: Set(notes.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    Ok(model)
}

/// Sends a GET request through the router.
#[allow(dead_code)]
pub async fn get(app: Router, uri: &str) -> Response {
    app.oneshot(
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request builds"),
    )
    .await
    .expect("router is infallible")
}

/// Sends a form-encoded POST request through the router.
#[allow(dead_code)]
pub async fn post_form(app: Router, uri: &str, form: &str) -> Response {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("request builds"),
    )
    .await
    .expect("router is infallible")
}

/// Reads a response body as JSON.
#[allow(dead_code)]
pub async fn json_body(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body reads");
    serde_json::from_slice(&bytes).expect("body is JSON")
}
