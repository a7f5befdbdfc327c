//! # Server Configuration
//!
//! This module contains the router and server setup for Lunchly.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use sea_orm::DatabaseConnection;
use tower_http::{normalize_path::NormalizePath, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers::{self, customers, reservations};
use crate::telemetry::trace_context_middleware;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub db: DatabaseConnection,
}

/// Creates and configures the Axum application router
///
/// Page routes accept paths with or without a trailing slash. The Swagger UI
/// sits outside the normalization since it redirects `/docs` to `/docs/`.
pub fn create_app(state: AppState) -> Router {
    let pages = Router::new()
        .route("/", get(customers::list_customers))
        .route("/search", get(customers::search_customers))
        .route("/top-ten", get(customers::top_ten))
        .route(
            "/add",
            get(customers::new_customer_form).post(customers::create_customer),
        )
        .route("/note-search", get(reservations::note_search))
        .route("/health", get(handlers::health))
        .route("/{id}", get(customers::show_customer))
        .route(
            "/{id}/edit",
            get(customers::edit_customer_form).post(customers::update_customer),
        )
        .route(
            "/{id}/add-reservation",
            post(reservations::add_reservation),
        )
        .with_state(state);

    Router::new()
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .fallback_service(NormalizePath::trim_trailing_slash(pages))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_context_middleware))
}

/// Starts the server with the given configuration
pub async fn run_server(config: AppConfig, db: DatabaseConnection) -> anyhow::Result<()> {
    let addr = config
        .bind_addr()
        .with_context(|| format!("Invalid server address: {}", config.api_bind_addr))?;

    let profile = config.profile.clone();
    let state = AppState {
        config: Arc::new(config),
        db,
    };
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, %profile, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health,
        crate::handlers::customers::list_customers,
        crate::handlers::customers::search_customers,
        crate::handlers::customers::top_ten,
        crate::handlers::customers::new_customer_form,
        crate::handlers::customers::create_customer,
        crate::handlers::customers::show_customer,
        crate::handlers::customers::edit_customer_form,
        crate::handlers::customers::update_customer,
        crate::handlers::reservations::note_search,
        crate::handlers::reservations::add_reservation,
    ),
    components(
        schemas(
            crate::models::ServiceInfo,
            crate::error::ApiError,
            crate::handlers::HealthStatus,
            crate::handlers::types::CustomerForm,
            crate::handlers::types::ReservationForm,
            crate::handlers::types::CustomerView,
            crate::handlers::types::CustomerListView,
            crate::handlers::types::CustomerDetailView,
            crate::handlers::types::CustomerFormView,
            crate::handlers::types::ReservationView,
            crate::handlers::types::ReservationListView,
        )
    ),
    tags(
        (name = "customers", description = "Customer lists, search and forms"),
        (name = "reservations", description = "Reservation creation and note search"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Lunchly API",
        description = "Restaurant reservation manager",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
