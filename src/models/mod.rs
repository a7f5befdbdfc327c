//! # Data Models
//!
//! This module contains the entity models for customers and reservations
//! together with the validation rules applied when their fields are assigned.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

pub mod customer;
pub mod reservation;

pub use customer::Entity as Customer;
pub use reservation::Entity as Reservation;

/// Input rejected while assigning a model field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("number of guests must be a whole number of at least 1, got '{value}'")]
    InvalidGuestCount { value: String },
    #[error("'{value}' is not a valid date")]
    InvalidStartAt { value: String },
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

impl ValidationError {
    /// Name of the field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidGuestCount { .. } => "num_guests",
            ValidationError::InvalidStartAt { .. } => "start_at",
            ValidationError::MissingField { field } => field,
        }
    }
}

/// Basic service information response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    /// The name of the service
    pub service: String,
    /// The version of the service
    pub version: String,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            service: "lunchly".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Notes are never stored as absent; missing or empty input becomes `""`.
pub(crate) fn notes_or_empty(notes: Option<String>) -> String {
    notes.filter(|n| !n.is_empty()).unwrap_or_default()
}

/// Trims optional text, treating blank input as absent.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
