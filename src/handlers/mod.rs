//! # API Handlers
//!
//! This module contains all the HTTP endpoint handlers for Lunchly.

pub mod customers;
pub mod reservations;
pub mod types;

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;
use crate::models::ServiceInfo;
use crate::server::AppState;

/// Service health and database reachability
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    #[serde(flatten)]
    pub service: ServiceInfo,
    /// `ok` or `unavailable`
    #[schema(example = "ok")]
    pub database: String,
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service and database are up", body = HealthStatus),
        (status = 503, description = "Database unreachable", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match db::health_check(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthStatus {
                service: ServiceInfo::default(),
                database: "ok".to_string(),
            }),
        ),
        Err(err) => {
            tracing::warn!(error = %err, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus {
                    service: ServiceInfo::default(),
                    database: "unavailable".to_string(),
                }),
            )
        }
    }
}

#[cfg(test)]
mod tests;
