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
use sqlx::{PgExecutor, PgPool};
use tracing::*;

/// PostgreSQL store. Each call checks a connection out of the pool and the
/// pool takes it back when the call returns, on success or error alike.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates the tables when they do not exist yet.
    pub async fn migrate(&self) -> Result<(), AppError> {
        for statement in [
            Customer::create_table_query(),
            Bill::create_table_query(),
            Bill::create_index_query(),
            User::create_table_query(),
        ] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Billing schema is ready");
        Ok(())
    }
}

async fn phone_taken<'e, E>(
    executor: E,
    phone_number: &str,
    except: Option<i64>,
) -> Result<bool, AppError>
where
    E: PgExecutor<'e>,
{
    Ok(sqlx::query_scalar::<_, bool>(Customer::phone_taken_query())
        .bind(phone_number)
        .bind(except)
        .fetch_one(executor)
        .await?)
}

#[async_trait]
impl BillingStore for PgStore {
    async fn create_customer(&self, input: CustomerCreate) -> Result<Customer, AppError> {
        if phone_taken(&self.pool, &input.phone_number, None).await? {
            return Err(duplicate_phone_number());
        }
        let customer = sqlx::query_as::<_, Customer>(Customer::insert_query())
            .bind(&input.name)
            .bind(&input.phone_number)
            .bind(&input.email)
            .bind(&input.address)
            .fetch_one(&self.pool)
            .await?;
        debug!("INSERT customer: {:?}", &customer);
        Ok(customer)
    }

    async fn list_customers(&self, page: Pagination) -> Result<Vec<Customer>, AppError> {
        let query = format!(
            "{} ORDER BY customer_id OFFSET $1 LIMIT $2",
            Customer::select_query()
        );
        Ok(sqlx::query_as::<_, Customer>(&query)
            .bind(page.offset())
            .bind(page.limit())
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_customer(&self, customer_id: i64) -> Result<Option<Customer>, AppError> {
        let query = format!("{} WHERE customer_id = $1", Customer::select_query());
        Ok(sqlx::query_as::<_, Customer>(&query)
            .bind(customer_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_customer(
        &self,
        customer_id: i64,
        patch: CustomerPatch,
    ) -> Result<Option<Customer>, AppError> {
        let mut tx = self.pool.begin().await?;
        let query = format!(
            "{} WHERE customer_id = $1 FOR UPDATE",
            Customer::select_query()
        );
        let Some(mut customer) = sqlx::query_as::<_, Customer>(&query)
            .bind(customer_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        if let Some(phone_number) = patch.phone_number.as_value() {
            if phone_taken(&mut *tx, phone_number, Some(customer_id)).await? {
                return Err(duplicate_phone_number());
            }
        }
        patch.apply(&mut customer);
        let customer = sqlx::query_as::<_, Customer>(Customer::update_query())
            .bind(customer_id)
            .bind(&customer.name)
            .bind(&customer.phone_number)
            .bind(&customer.email)
            .bind(&customer.address)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        debug!("UPDATE customer: {:?}", &customer);
        Ok(Some(customer))
    }

    async fn delete_customer(&self, customer_id: i64) -> Result<Option<Customer>, AppError> {
        // Dropping `tx` on any early return rolls everything back.
        let mut tx = self.pool.begin().await?;
        let query = format!(
            "{} WHERE customer_id = $1 FOR UPDATE",
            Customer::select_query()
        );
        let Some(customer) = sqlx::query_as::<_, Customer>(&query)
            .bind(customer_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        let bills = sqlx::query(Bill::delete_by_customer_query())
            .bind(customer_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        sqlx::query(Customer::delete_query())
            .bind(customer_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        debug!("DELETE customer {} with {} bills", customer_id, bills);
        Ok(Some(customer))
    }

    async fn create_bill(&self, input: BillCreate) -> Result<Bill, AppError> {
        let bill = sqlx::query_as::<_, Bill>(Bill::insert_query())
            .bind(input.customer_id)
            .bind(input.billing_date)
            .bind(input.due_date)
            .bind(input.amount)
            .bind(input.status.as_str())
            .fetch_one(&self.pool)
            .await?;
        debug!("INSERT bill: {:?}", &bill);
        Ok(bill)
    }

    async fn list_bills(&self, page: Pagination) -> Result<Vec<Bill>, AppError> {
        let query = format!("{} ORDER BY bill_id OFFSET $1 LIMIT $2", Bill::select_query());
        Ok(sqlx::query_as::<_, Bill>(&query)
            .bind(page.offset())
            .bind(page.limit())
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_bill(&self, bill_id: i64) -> Result<Option<Bill>, AppError> {
        let query = format!("{} WHERE bill_id = $1", Bill::select_query());
        Ok(sqlx::query_as::<_, Bill>(&query)
            .bind(bill_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update_bill(&self, bill_id: i64, patch: BillPatch) -> Result<Option<Bill>, AppError> {
        let mut tx = self.pool.begin().await?;
        let query = format!("{} WHERE bill_id = $1 FOR UPDATE", Bill::select_query());
        let Some(mut bill) = sqlx::query_as::<_, Bill>(&query)
            .bind(bill_id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };
        patch.apply(&mut bill);
        let bill = sqlx::query_as::<_, Bill>(Bill::update_query())
            .bind(bill_id)
            .bind(bill.customer_id)
            .bind(bill.billing_date)
            .bind(bill.due_date)
            .bind(bill.amount)
            .bind(bill.status.as_str())
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        debug!("UPDATE bill: {:?}", &bill);
        Ok(Some(bill))
    }

    async fn delete_bill(&self, bill_id: i64) -> Result<Option<Bill>, AppError> {
        Ok(sqlx::query_as::<_, Bill>(Bill::delete_query())
            .bind(bill_id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        if self.get_user(&user.username).await?.is_some() {
            return Err(duplicate_username());
        }
        let user = sqlx::query_as::<_, User>(User::insert_query())
            .bind(&user.username)
            .bind(&user.hashed_password)
            .bind(user.role.as_str())
            .fetch_one(&self.pool)
            .await?;
        debug!("INSERT user: {} ({})", &user.username, user.role);
        Ok(user)
    }

    async fn get_user(&self, username: &str) -> Result<Option<User>, AppError> {
        let query = format!("{} WHERE username = $1", User::select_query());
        Ok(sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?)
    }
}
