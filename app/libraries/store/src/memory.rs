use crate::{BillingStore, duplicate_phone_number, duplicate_username};
use app_dto::{
    auth::user::NewUser,
    bill::{BillCreate, BillPatch},
    customer::{CustomerCreate, CustomerPatch},
    pagination::Pagination,
};
use app_error::AppError;
use app_schema::{auth::users::User, bill::Bill, customer::Customer};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Tables {
    customers: BTreeMap<i64, Customer>,
    bills: BTreeMap<i64, Bill>,
    users: BTreeMap<String, User>,
    last_customer_id: i64,
    last_bill_id: i64,
}

impl Tables {
    fn phone_taken(&self, phone_number: &str, except: Option<i64>) -> bool {
        self.customers
            .values()
            .any(|c| c.phone_number == phone_number && Some(c.customer_id) != except)
    }
}

fn page_of<T: Clone>(rows: &BTreeMap<i64, T>, page: Pagination) -> Vec<T> {
    rows.values()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect()
}

/// Process-local store with the same semantics as [`crate::PgStore`].
///
/// A single lock guards all tables, so the customer cascade is atomic.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of bills that reference `customer_id`.
    pub async fn bills_for_customer(&self, customer_id: i64) -> usize {
        let tables = self.tables.read().await;
        tables
            .bills
            .values()
            .filter(|b| b.customer_id == customer_id)
            .count()
    }
}

#[async_trait]
impl BillingStore for MemoryStore {
    async fn create_customer(&self, input: CustomerCreate) -> Result<Customer, AppError> {
        let mut tables = self.tables.write().await;
        if tables.phone_taken(&input.phone_number, None) {
            return Err(duplicate_phone_number());
        }
        tables.last_customer_id += 1;
        let customer = Customer {
            customer_id: tables.last_customer_id,
            name: input.name,
            phone_number: input.phone_number,
            email: input.email,
            address: input.address,
        };
        tables
            .customers
            .insert(customer.customer_id, customer.clone());
        Ok(customer)
    }

    async fn list_customers(&self, page: Pagination) -> Result<Vec<Customer>, AppError> {
        Ok(page_of(&self.tables.read().await.customers, page))
    }

    async fn get_customer(&self, customer_id: i64) -> Result<Option<Customer>, AppError> {
        Ok(self.tables.read().await.customers.get(&customer_id).cloned())
    }

    async fn update_customer(
        &self,
        customer_id: i64,
        patch: CustomerPatch,
    ) -> Result<Option<Customer>, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.customers.contains_key(&customer_id) {
            return Ok(None);
        }
        if let Some(phone_number) = patch.phone_number.as_value() {
            if tables.phone_taken(phone_number, Some(customer_id)) {
                return Err(duplicate_phone_number());
            }
        }
        let Some(customer) = tables.customers.get_mut(&customer_id) else {
            return Ok(None);
        };
        patch.apply(customer);
        Ok(Some(customer.clone()))
    }

    async fn delete_customer(&self, customer_id: i64) -> Result<Option<Customer>, AppError> {
        let mut tables = self.tables.write().await;
        if !tables.customers.contains_key(&customer_id) {
            return Ok(None);
        }
        tables.bills.retain(|_, bill| bill.customer_id != customer_id);
        Ok(tables.customers.remove(&customer_id))
    }

    async fn create_bill(&self, input: BillCreate) -> Result<Bill, AppError> {
        let mut tables = self.tables.write().await;
        tables.last_bill_id += 1;
        let bill = Bill {
            bill_id: tables.last_bill_id,
            customer_id: input.customer_id,
            billing_date: input.billing_date,
            due_date: input.due_date,
            amount: input.amount,
            status: input.status,
        };
        tables.bills.insert(bill.bill_id, bill.clone());
        Ok(bill)
    }

    async fn list_bills(&self, page: Pagination) -> Result<Vec<Bill>, AppError> {
        Ok(page_of(&self.tables.read().await.bills, page))
    }

    async fn get_bill(&self, bill_id: i64) -> Result<Option<Bill>, AppError> {
        Ok(self.tables.read().await.bills.get(&bill_id).cloned())
    }

    async fn update_bill(&self, bill_id: i64, patch: BillPatch) -> Result<Option<Bill>, AppError> {
        let mut tables = self.tables.write().await;
        let Some(bill) = tables.bills.get_mut(&bill_id) else {
            return Ok(None);
        };
        patch.apply(bill);
        Ok(Some(bill.clone()))
    }

    async fn delete_bill(&self, bill_id: i64) -> Result<Option<Bill>, AppError> {
        Ok(self.tables.write().await.bills.remove(&bill_id))
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;
        if tables.users.contains_key(&user.username) {
            return Err(duplicate_username());
        }
        let user = User {
            username: user.username,
            hashed_password: user.hashed_password,
            role: user.role,
            is_active: true,
        };
        tables.users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(username).cloned())
    }
}
