//! # Lunchly Library
//!
//! This library provides the core functionality for the Lunchly reservation
//! manager: customer and reservation models, their repositories, handlers,
//! and server configuration.

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repositories;
pub mod search;
pub mod server;
pub mod telemetry;
pub use migration;
