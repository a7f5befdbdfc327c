//! Customer entity model
//!
//! This module contains the SeaORM entity model for the customers table.
//! Customers are created through the add form, edited in place and never
//! deleted.

use sea_orm::entity::prelude::*;
use sea_orm::{ActiveModelBehavior, ActiveValue::NotSet, FromQueryResult, Set};

use super::{ValidationError, notes_or_empty, optional_text};

/// Customer entity: a person who can hold reservations
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    /// Surrogate identifier (primary key)
    #[sea_orm(primary_key)]
    pub id: i32,

    pub first_name: String,

    pub last_name: String,

    /// Contact phone number (optional)
    pub phone: Option<String>,

    /// Free-text notes, empty string when none were given
    pub notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservation,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservation.def()
    }
}

impl Model {
    /// Display name, first name then last name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl ActiveModel {
    /// Starts a customer that has not been saved yet; saving it assigns an id.
    pub fn new_customer(
        first_name: &str,
        last_name: &str,
    ) -> Result<Self, ValidationError> {
        let mut customer = Self {
            id: NotSet,
            first_name: NotSet,
            last_name: NotSet,
            phone: Set(None),
            notes: Set(String::new()),
        };
        customer.set_name(first_name, last_name)?;
        Ok(customer)
    }

    /// Assigns both names; surrounding whitespace is dropped and neither may be blank.
    pub fn set_name(&mut self, first_name: &str, last_name: &str) -> Result<(), ValidationError> {
        let first_name = first_name.trim();
        if first_name.is_empty() {
            return Err(ValidationError::MissingField { field: "first_name" });
        }
        let last_name = last_name.trim();
        if last_name.is_empty() {
            return Err(ValidationError::MissingField { field: "last_name" });
        }

        self.first_name = Set(first_name.to_string());
        self.last_name = Set(last_name.to_string());
        Ok(())
    }

    /// A blank phone number is stored as absent.
    pub fn set_phone(&mut self, phone: Option<String>) {
        self.phone = Set(optional_text(phone));
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = Set(notes_or_empty(notes));
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// A customer together with how many reservations they hold.
#[derive(Clone, Debug, PartialEq, Eq, FromQueryResult)]
pub struct RankedCustomer {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub notes: String,
    pub reservation_count: i64,
}

impl RankedCustomer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
