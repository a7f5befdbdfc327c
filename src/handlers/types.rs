//! # View Types
//!
//! Request forms and the view models handlers render. Views carry everything
//! a page needs, including derived values such as full names and formatted
//! start times.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::models::customer::{Model as CustomerModel, RankedCustomer};
use crate::models::reservation::Model as ReservationModel;

/// Form body for adding or editing a customer
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerForm {
    #[serde(default)]
    #[schema(example = "Ada")]
    pub first_name: String,
    #[serde(default)]
    #[schema(example = "Lovelace")]
    pub last_name: String,
    #[serde(default)]
    #[schema(example = "555-0100")]
    pub phone: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Form body for adding a reservation
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationForm {
    /// Start time, e.g. `2025-01-05T19:30`
    #[serde(default)]
    #[schema(example = "2025-01-05T19:30")]
    pub start_at: String,
    /// Party size, at least 1
    #[serde(default)]
    #[schema(example = "4")]
    pub num_guests: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Query string of the customer search
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// First and last name, separated by whitespace
    #[serde(default)]
    pub search: String,
}

/// Query string of the reservation note search
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct NoteSearchQuery {
    /// Terms that must all appear in the notes
    #[serde(default)]
    pub note_search: String,
}

/// One customer as shown in lists and detail pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    #[schema(example = "Ada Lovelace")]
    pub full_name: String,
    pub phone: Option<String>,
    pub notes: String,
    /// Present only in the best-customers listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reservation_count: Option<i64>,
}

impl From<CustomerModel> for CustomerView {
    fn from(customer: CustomerModel) -> Self {
        Self {
            full_name: customer.full_name(),
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            phone: customer.phone,
            notes: customer.notes,
            reservation_count: None,
        }
    }
}

impl From<RankedCustomer> for CustomerView {
    fn from(customer: RankedCustomer) -> Self {
        Self {
            full_name: customer.full_name(),
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            phone: customer.phone,
            notes: customer.notes,
            reservation_count: Some(customer.reservation_count),
        }
    }
}

/// Customer list page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerListView {
    pub customers: Vec<CustomerView>,
}

impl<T: Into<CustomerView>> FromIterator<T> for CustomerListView {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            customers: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// One reservation as shown on a customer page or in search results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReservationView {
    pub id: i32,
    pub customer_id: i32,
    pub num_guests: i32,
    pub start_at: NaiveDateTime,
    /// Start time for display, e.g. `January 5th 2025, 7:30 pm`
    #[schema(example = "January 5th 2025, 7:30 pm")]
    pub start_at_display: String,
    pub notes: String,
}

impl From<ReservationModel> for ReservationView {
    fn from(reservation: ReservationModel) -> Self {
        Self {
            start_at_display: reservation.formatted_start_at(),
            id: reservation.id,
            customer_id: reservation.customer_id,
            num_guests: reservation.num_guests,
            start_at: reservation.start_at,
            notes: reservation.notes,
        }
    }
}

/// Reservation list page
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReservationListView {
    pub reservations: Vec<ReservationView>,
}

/// Customer page: the customer and their reservations
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerDetailView {
    pub customer: CustomerView,
    pub reservations: Vec<ReservationView>,
    /// Where the add-reservation form posts to
    #[schema(example = "/7/add-reservation/")]
    pub add_reservation_action: String,
}

/// A form page: where it posts and the values to prefill
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CustomerFormView {
    #[schema(example = "/add/")]
    pub action: String,
    #[schema(example = "POST")]
    pub method: String,
    pub values: CustomerForm,
}

impl CustomerFormView {
    /// Empty form for a new customer
    pub fn new_customer() -> Self {
        Self {
            action: "/add/".to_string(),
            method: "POST".to_string(),
            values: CustomerForm::default(),
        }
    }

    /// Form prefilled with an existing customer
    pub fn edit(customer: CustomerModel) -> Self {
        Self {
            action: format!("/{}/edit/", customer.id),
            method: "POST".to_string(),
            values: CustomerForm {
                first_name: customer.first_name,
                last_name: customer.last_name,
                phone: customer.phone,
                notes: Some(customer.notes),
            },
        }
    }
}
