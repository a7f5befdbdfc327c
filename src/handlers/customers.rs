//! # Customer Handlers
//!
//! Listing, searching, adding and editing customers, plus the customer page
//! with its reservations.

use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Json, Redirect},
};
use metrics::counter;
use sea_orm::IntoActiveModel;

use crate::error::ApiError;
use crate::handlers::types::{
    CustomerDetailView, CustomerForm, CustomerFormView, CustomerListView, ReservationView,
    SearchQuery,
};
use crate::models::customer::ActiveModel as CustomerActiveModel;
use crate::repositories::CustomerRepository;
use crate::search::filter_by_full_name;
use crate::server::AppState;

/// Path of a customer's page
pub(crate) fn customer_path(customer_id: i32) -> String {
    format!("/{}/", customer_id)
}

/// List all customers
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "All customers, by last then first name", body = CustomerListView),
        (status = 503, description = "Database unavailable", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "customers"
)]
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<CustomerListView>, ApiError> {
    let customers = CustomerRepository::new(&state.db).all().await?;

    Ok(Json(customers.into_iter().collect()))
}

/// Find customers by full name
///
/// A customer is listed only when the query holds both their first and last
/// name.
#[utoipa::path(
    get,
    path = "/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Customers whose full name is in the query", body = CustomerListView),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "customers"
)]
pub async fn search_customers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<CustomerListView>, ApiError> {
    counter!("customer_searches_total").increment(1);

    let customers = CustomerRepository::new(&state.db).all().await?;
    let matches = filter_by_full_name(customers, &query.search);

    tracing::debug!(
        query = %query.search,
        matches = matches.len(),
        "Customer search"
    );

    Ok(Json(matches.into_iter().collect()))
}

/// List the customers with the most reservations
#[utoipa::path(
    get,
    path = "/top-ten",
    responses(
        (status = 200, description = "Best customers with their reservation counts", body = CustomerListView),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "customers"
)]
pub async fn top_ten(State(state): State<AppState>) -> Result<Json<CustomerListView>, ApiError> {
    let ranked = CustomerRepository::new(&state.db)
        .best_customers(state.config.top_customers_limit)
        .await?;

    Ok(Json(ranked.into_iter().collect()))
}

/// Empty form for adding a customer
#[utoipa::path(
    get,
    path = "/add/",
    responses(
        (status = 200, description = "New-customer form", body = CustomerFormView)
    ),
    tag = "customers"
)]
pub async fn new_customer_form() -> Json<CustomerFormView> {
    Json(CustomerFormView::new_customer())
}

/// Add a customer
#[utoipa::path(
    post,
    path = "/add/",
    request_body(content = CustomerForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Customer created; redirects to the customer page", headers(
            ("Location", description = "Path of the new customer")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "customers"
)]
pub async fn create_customer(
    State(state): State<AppState>,
    Form(form): Form<CustomerForm>,
) -> Result<Redirect, ApiError> {
    let mut customer = CustomerActiveModel::new_customer(&form.first_name, &form.last_name)?;
    customer.set_phone(form.phone);
    customer.set_notes(form.notes);

    let saved = CustomerRepository::new(&state.db).save(customer).await?;

    counter!("customers_created_total").increment(1);
    tracing::info!(customer_id = saved.id, "Customer created");

    Ok(Redirect::to(&customer_path(saved.id)))
}

/// Show a customer and their reservations
#[utoipa::path(
    get,
    path = "/{id}/",
    params(
        ("id" = i32, Path, description = "Customer id")
    ),
    responses(
        (status = 200, description = "Customer with reservations, earliest first", body = CustomerDetailView),
        (status = 400, description = "Malformed customer id"),
        (status = 404, description = "No such customer", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "customers"
)]
pub async fn show_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Json<CustomerDetailView>, ApiError> {
    let repo = CustomerRepository::new(&state.db);
    let customer = repo.get(customer_id).await?;
    let reservations = repo.reservations(&customer).await?;

    Ok(Json(CustomerDetailView {
        add_reservation_action: format!("/{}/add-reservation/", customer.id),
        customer: customer.into(),
        reservations: reservations.into_iter().map(ReservationView::from).collect(),
    }))
}

/// Form prefilled with a customer's current details
#[utoipa::path(
    get,
    path = "/{id}/edit/",
    params(
        ("id" = i32, Path, description = "Customer id")
    ),
    responses(
        (status = 200, description = "Edit form", body = CustomerFormView),
        (status = 404, description = "No such customer", body = ApiError)
    ),
    tag = "customers"
)]
pub async fn edit_customer_form(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
) -> Result<Json<CustomerFormView>, ApiError> {
    let customer = CustomerRepository::new(&state.db).get(customer_id).await?;

    Ok(Json(CustomerFormView::edit(customer)))
}

/// Update a customer
#[utoipa::path(
    post,
    path = "/{id}/edit/",
    params(
        ("id" = i32, Path, description = "Customer id")
    ),
    request_body(content = CustomerForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Customer updated; redirects to the customer page", headers(
            ("Location", description = "Path of the customer")
        )),
        (status = 400, description = "Validation failed", body = ApiError),
        (status = 404, description = "No such customer", body = ApiError),
        (status = 500, description = "Internal server error", body = ApiError)
    ),
    tag = "customers"
)]
pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<i32>,
    Form(form): Form<CustomerForm>,
) -> Result<Redirect, ApiError> {
    let repo = CustomerRepository::new(&state.db);
    let mut customer = repo.get(customer_id).await?.into_active_model();

    customer.set_name(&form.first_name, &form.last_name)?;
    customer.set_phone(form.phone);
    customer.set_notes(form.notes);

    let saved = repo.save(customer).await?;

    counter!("customers_updated_total").increment(1);
    tracing::info!(customer_id = saved.id, "Customer updated");

    Ok(Redirect::to(&customer_path(saved.id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn customer_path_has_trailing_slash() {
        assert_eq!(customer_path(42), "/42/");
    }

    #[tokio::test]
    async fn new_customer_form_posts_to_add() {
        let Json(view) = new_customer_form().await;

        assert_eq!(view.action, "/add/");
        assert_eq!(view.method, "POST");
        assert!(view.values.first_name.is_empty());
    }
}
