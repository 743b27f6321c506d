//! Persistence for customers, bills and users.
//!
//! Handlers only see [`BillingStore`]. [`PgStore`] is the PostgreSQL
//! implementation used by the service; [`MemoryStore`] keeps the same
//! semantics in process memory and backs the test suites.
//!
//! Every mutation commits on its own. The only multi-statement unit is the
//! customer delete, which removes the customer's bills first.

mod memory;
mod pg;

pub use memory::MemoryStore;
pub use pg::PgStore;

use app_dto::{
    auth::user::NewUser,
    bill::{BillCreate, BillPatch},
    customer::{CustomerCreate, CustomerPatch},
    pagination::Pagination,
};
use app_error::AppError;
use app_schema::{auth::users::User, bill::Bill, customer::Customer};
use async_trait::async_trait;

/// Lookups and deletes report absence as `Ok(None)`; only uniqueness
/// conflicts and backend failures are errors.
#[async_trait]
pub trait BillingStore: Send + Sync {
    async fn create_customer(&self, input: CustomerCreate) -> Result<Customer, AppError>;
    async fn list_customers(&self, page: Pagination) -> Result<Vec<Customer>, AppError>;
    async fn get_customer(&self, customer_id: i64) -> Result<Option<Customer>, AppError>;
    async fn update_customer(
        &self,
        customer_id: i64,
        patch: CustomerPatch,
    ) -> Result<Option<Customer>, AppError>;
    /// Removes the customer and every bill that references it.
    async fn delete_customer(&self, customer_id: i64) -> Result<Option<Customer>, AppError>;

    /// `customer_id` is stored as given; it is not checked against customers.
    async fn create_bill(&self, input: BillCreate) -> Result<Bill, AppError>;
    async fn list_bills(&self, page: Pagination) -> Result<Vec<Bill>, AppError>;
    async fn get_bill(&self, bill_id: i64) -> Result<Option<Bill>, AppError>;
    async fn update_bill(&self, bill_id: i64, patch: BillPatch) -> Result<Option<Bill>, AppError>;
    async fn delete_bill(&self, bill_id: i64) -> Result<Option<Bill>, AppError>;

    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;
    async fn get_user(&self, username: &str) -> Result<Option<User>, AppError>;
}

pub(crate) fn duplicate_phone_number() -> AppError {
    AppError::conflict("Phone number already registered")
}

pub(crate) fn duplicate_username() -> AppError {
    AppError::conflict("Username already registered")
}
