//! # Reservation Handlers

use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Json, Redirect},
};
use metrics::counter;

use crate::error::ApiError;
use crate::handlers::customers::customer_path;
use crate::handlers::types::{NoteSearchQuery, ReservationForm, ReservationListView};
use crate::models::reservation::{ActiveModel as ReservationActiveModel, parse_num_guests};
use crate::repositories::{CustomerRepository, ReservationRepository};
use crate::server::AppState;

/// Find reservations by their notes
///
/// Every whitespace-separated term must appear in the notes, ignoring case.
/// A blank query finds nothing.
#[utoipa::path(
    get,
    path = "/note-search",
    params(NoteSearchQuery),
    responses(
        (status = 200, description = "Matching reservations, earliest first", body = ReservationListView),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "reservations"
)]
pub async fn note_search(
    State(state): State<AppState>,
    Query(query): Query<NoteSearchQuery>,
) -> Result<Json<ReservationListView>, ApiError> {
    let reservations = ReservationRepository::new(&state.db)
        .search_notes(&query.note_search)
        .await?;

    Ok(Json(ReservationListView {
        reservations: reservations.into_iter().map(Into::into).collect(),
    }))
}

/// Add a reservation for a customer
#[utoipa::path(
    post,
    path = "/{id}/add-reservation/",
    params(
        ("id" = i32, Path, description = "Customer id")
    ),
    request_body(content = ReservationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Reservation created; redirects to the customer page", headers(
            ("Location", description = "Path of the customer")
        )),
        (status = 400, description = "Invalid guest count or start time", body = ApiError),
        (status = 404, description = "No such customer", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "reservations"
)]
pub async fn add_reservation(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    Form(form): Form<ReservationForm>,
) -> Result<Redirect, ApiError> {
    let customer = CustomerRepository::new(&state.db).get(customer_id).await?;

    let mut reservation = ReservationActiveModel::new_reservation(customer.id);
    reservation.set_num_guests(parse_num_guests(&form.num_guests)?)?;
    reservation.set_start_at(&form.start_at)?;
    reservation.set_notes(form.notes);

    let saved = ReservationRepository::new(&state.db)
        .save(reservation)
        .await?;

    counter!("reservations_created_total").increment(1);
    tracing::info!(
        customer_id = customer.id,
        reservation_id = saved.id,
        num_guests = saved.num_guests,
        "Reservation created"
    );

    Ok(Redirect::to(&customer_path(customer.id)))
}
