//! # Reservation Repository
//!
//! This module contains the repository implementation for Reservation
//! entities: per-customer listing, note search and insert-or-update
//! persistence.

use crate::error::RepositoryError;
use crate::models::reservation::{
    self, ActiveModel as ReservationActiveModel, Entity as Reservation,
    Model as ReservationModel,
};
use crate::search::{contains_all_terms, tokenize};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, TryIntoModel,
};

/// Repository for Reservation database operations
pub struct ReservationRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ReservationRepository<'a> {
    /// Create a new ReservationRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// All reservations for `customer_id`, earliest first.
    ///
    /// An unknown customer or one without reservations yields an empty list.
    pub async fn for_customer(
        &self,
        customer_id: i32,
    ) -> Result<Vec<ReservationModel>, RepositoryError> {
        let reservations = Reservation::find()
            .filter(reservation::Column::CustomerId.eq(customer_id))
            .order_by_asc(reservation::Column::StartAt)
            .order_by_asc(reservation::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(reservations)
    }

    /// Reservations whose notes contain every whitespace-separated term of
    /// `phrase`, ignoring case, earliest first. A blank phrase matches nothing.
    ///
    /// Case folding happens in Rust so non-ASCII notes fold the same way on
    /// every backend; the query only skips reservations without notes.
    pub async fn search_notes(
        &self,
        phrase: &str,
    ) -> Result<Vec<ReservationModel>, RepositoryError> {
        let terms = tokenize(phrase);
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = Reservation::find()
            .filter(reservation::Column::Notes.ne(""))
            .order_by_asc(reservation::Column::StartAt)
            .order_by_asc(reservation::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(candidates
            .into_iter()
            .filter(|reservation| contains_all_terms(&reservation.notes, &terms))
            .collect())
    }

    /// Persist a reservation: inserts when the id is unset, otherwise updates
    /// guest count, start time and notes of the row with that id.
    ///
    /// The owning customer of an existing reservation is never changed.
    pub async fn save(
        &self,
        mut reservation: ReservationActiveModel,
    ) -> Result<ReservationModel, RepositoryError> {
        reservation.validate()?;

        let is_new = reservation.id.is_not_set();
        if !is_new && let ActiveValue::Set(customer_id) = reservation.customer_id {
            reservation.customer_id = ActiveValue::Unchanged(customer_id);
        }

        let saved = reservation
            .save(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .try_into_model()
            .map_err(RepositoryError::database_error)?;

        if is_new {
            tracing::debug!(
                reservation_id = saved.id,
                customer_id = saved.customer_id,
                "Inserted reservation"
            );
        } else {
            tracing::debug!(reservation_id = saved.id, "Updated reservation");
        }

        Ok(saved)
    }
}
