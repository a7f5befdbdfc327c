//! # Customer Repository
//!
//! This module contains the repository implementation for Customer entities:
//! ordered listing, lookup by id, reservation loading, the best-customers
//! ranking, and insert-or-update persistence.

use crate::error::RepositoryError;
use crate::models::customer::{
    self, ActiveModel as CustomerActiveModel, Entity as Customer, Model as CustomerModel,
    RankedCustomer,
};
use crate::models::reservation::{self, Model as ReservationModel};
use crate::repositories::ReservationRepository;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, JoinType, QueryOrder,
    QuerySelect, RelationTrait, TryIntoModel,
};

/// Repository for Customer database operations
pub struct CustomerRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new CustomerRepository with the given database connection
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// List all customers ordered by last name, then first name
    pub async fn all(&self) -> Result<Vec<CustomerModel>, RepositoryError> {
        let customers = Customer::find()
            .order_by_asc(customer::Column::LastName)
            .order_by_asc(customer::Column::FirstName)
            .order_by_asc(customer::Column::Id)
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(customers)
    }

    /// Get a customer by id, failing with `NotFound` when there is none
    pub async fn get(&self, customer_id: i32) -> Result<CustomerModel, RepositoryError> {
        Customer::find_by_id(customer_id)
            .one(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .ok_or_else(|| RepositoryError::not_found("customer", customer_id))
    }

    /// Reservations held by `customer`, earliest first
    pub async fn reservations(
        &self,
        customer: &CustomerModel,
    ) -> Result<Vec<ReservationModel>, RepositoryError> {
        ReservationRepository::new(self.db)
            .for_customer(customer.id)
            .await
    }

    /// Customers holding the most reservations, at most `limit` of them.
    ///
    /// Ties are ordered by last then first name. Customers without any
    /// reservation are not ranked.
    pub async fn best_customers(
        &self,
        limit: u64,
    ) -> Result<Vec<RankedCustomer>, RepositoryError> {
        let reservation_count = Expr::col((reservation::Entity, reservation::Column::Id)).count();

        let ranked = Customer::find()
            .select_only()
            .columns([
                customer::Column::Id,
                customer::Column::FirstName,
                customer::Column::LastName,
                customer::Column::Phone,
                customer::Column::Notes,
            ])
            .column_as(reservation_count.clone(), "reservation_count")
            .join(JoinType::InnerJoin, customer::Relation::Reservation.def())
            .group_by(customer::Column::Id)
            .group_by(customer::Column::FirstName)
            .group_by(customer::Column::LastName)
            .group_by(customer::Column::Phone)
            .group_by(customer::Column::Notes)
            .order_by_desc(reservation_count)
            .order_by_asc(customer::Column::LastName)
            .order_by_asc(customer::Column::FirstName)
            .limit(limit)
            .into_model::<RankedCustomer>()
            .all(self.db)
            .await
            .map_err(RepositoryError::database_error)?;

        Ok(ranked)
    }

    /// Persist a customer: inserts when the id is unset, otherwise updates
    /// the row with that id. Returns the stored row.
    pub async fn save(
        &self,
        customer: CustomerActiveModel,
    ) -> Result<CustomerModel, RepositoryError> {
        let is_new = customer.id.is_not_set();

        let saved = customer
            .save(self.db)
            .await
            .map_err(RepositoryError::database_error)?
            .try_into_model()
            .map_err(RepositoryError::database_error)?;

        if is_new {
            tracing::debug!(customer_id = saved.id, "Inserted customer");
        } else {
            tracing::debug!(customer_id = saved.id, "Updated customer");
        }

        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reservation::ActiveModel as ReservationActiveModel;
    use crate::repositories::ReservationRepository;
    use sea_orm::{Database, IntoActiveModel, Set};

    async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to open test DB");

        use migration::MigratorTrait;
        migration::Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    async fn add_customer(repo: &CustomerRepository<'_>, first: &str, last: &str) -> CustomerModel {
        let draft = CustomerActiveModel::new_customer(first, last).unwrap();
        repo.save(draft).await.unwrap()
    }

    async fn add_reservations(db: &DatabaseConnection, customer_id: i32, count: usize) {
        let repo = ReservationRepository::new(db);
        for day in 0..count {
            let mut draft = ReservationActiveModel::new_reservation(customer_id);
            draft.set_num_guests(2).unwrap();
            draft
                .set_start_at(&format!("2025-03-{:02}T19:00", day + 1))
                .unwrap();
            repo.save(draft).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_save_new_customer_assigns_id() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        let mut draft = CustomerActiveModel::new_customer("Ada", "Lovelace").unwrap();
        draft.set_phone(Some("555-0100".to_string()));
        draft.set_notes(None);

        let saved = repo.save(draft).await.unwrap();

        assert!(saved.id > 0);
        assert_eq!(saved.full_name(), "Ada Lovelace");
        assert_eq!(saved.phone.as_deref(), Some("555-0100"));
        assert_eq!(saved.notes, "");
    }

    #[tokio::test]
    async fn test_save_existing_customer_keeps_id() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        let created = add_customer(&repo, "Ada", "Lovelace").await;

        let mut active = created.clone().into_active_model();
        active.set_name("Augusta", "King").unwrap();
        active.set_notes(Some("Countess".to_string()));
        let updated = repo.save(active).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.full_name(), "Augusta King");
        assert_eq!(updated.notes, "Countess");

        let reloaded = repo.get(created.id).await.unwrap();
        assert_eq!(reloaded, updated);
        assert_eq!(repo.all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_customer_is_not_found() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        let err = repo.get(9999).await.unwrap_err();
        assert!(matches!(
            err,
            RepositoryError::NotFound {
                entity: "customer",
                id: 9999
            }
        ));
    }

    #[tokio::test]
    async fn test_all_orders_by_last_then_first_name() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        add_customer(&repo, "Grace", "Hopper").await;
        add_customer(&repo, "Charles", "Babbage").await;
        add_customer(&repo, "Ada", "Hopper").await;

        let names: Vec<String> = repo
            .all()
            .await
            .unwrap()
            .iter()
            .map(CustomerModel::full_name)
            .collect();

        assert_eq!(names, ["Charles Babbage", "Ada Hopper", "Grace Hopper"]);
    }

    #[tokio::test]
    async fn test_reservations_empty_for_new_customer() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        let customer = add_customer(&repo, "Ada", "Lovelace").await;
        let reservations = repo.reservations(&customer).await.unwrap();

        assert!(reservations.is_empty());
    }

    #[tokio::test]
    async fn test_reservations_only_for_that_customer() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        let ada = add_customer(&repo, "Ada", "Lovelace").await;
        let grace = add_customer(&repo, "Grace", "Hopper").await;
        add_reservations(&db, ada.id, 2).await;
        add_reservations(&db, grace.id, 1).await;

        let reservations = repo.reservations(&ada).await.unwrap();
        assert_eq!(reservations.len(), 2);
        assert!(reservations.iter().all(|r| r.customer_id == ada.id));
        assert!(reservations[0].start_at < reservations[1].start_at);
    }

    #[tokio::test]
    async fn test_reservations_match_reservation_repository() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        let ada = add_customer(&repo, "Ada", "Lovelace").await;
        add_reservations(&db, ada.id, 3).await;

        let via_customer = repo.reservations(&ada).await.unwrap();
        let via_reservations = ReservationRepository::new(&db)
            .for_customer(ada.id)
            .await
            .unwrap();
        assert_eq!(via_customer, via_reservations);
    }

    #[tokio::test]
    async fn test_best_customers_ranked_by_reservation_count() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        let ada = add_customer(&repo, "Ada", "Lovelace").await;
        let grace = add_customer(&repo, "Grace", "Hopper").await;
        let charles = add_customer(&repo, "Charles", "Babbage").await;
        let _idle = add_customer(&repo, "Alan", "Turing").await;

        add_reservations(&db, ada.id, 1).await;
        add_reservations(&db, grace.id, 3).await;
        add_reservations(&db, charles.id, 1).await;

        let ranked = repo.best_customers(10).await.unwrap();
        let summary: Vec<(String, i64)> = ranked
            .iter()
            .map(|c| (c.full_name(), c.reservation_count))
            .collect();

        assert_eq!(
            summary,
            [
                ("Grace Hopper".to_string(), 3),
                ("Charles Babbage".to_string(), 1),
                ("Ada Lovelace".to_string(), 1),
            ]
        );
    }

    #[tokio::test]
    async fn test_best_customers_respects_limit() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        for i in 0..12 {
            let customer = add_customer(&repo, "Guest", &format!("Number{i:02}")).await;
            add_reservations(&db, customer.id, 1).await;
        }

        assert_eq!(repo.best_customers(10).await.unwrap().len(), 10);
        assert_eq!(repo.best_customers(3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_update_only_touches_set_fields() {
        let db = setup_test_db().await;
        let repo = CustomerRepository::new(&db);

        let created = add_customer(&repo, "Ada", "Lovelace").await;

        let mut active = created.clone().into_active_model();
        active.phone = Set(Some("555-0199".to_string()));
        let updated = repo.save(active).await.unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.first_name, created.first_name);
        assert_eq!(updated.phone.as_deref(), Some("555-0199"));
    }
}
