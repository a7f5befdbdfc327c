//! # Repository Layer
//!
//! This module contains repository implementations that encapsulate SeaORM
//! operations for customers and reservations.

pub mod customer;
pub mod reservation;

pub use customer::CustomerRepository;
pub use reservation::ReservationRepository;
