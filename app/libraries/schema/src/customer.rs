use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub customer_id: i64,
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub address: String,
}

impl Customer {
    #[inline]
    pub fn create_table_query() -> &'static str {
        include_str!("../../../SQL/billing/customers/create_table.sql")
    }

    #[inline]
    pub fn select_query() -> &'static str {
        include_str!("../../../SQL/billing/customers/select_base.sql")
    }

    #[inline]
    pub fn insert_query() -> &'static str {
        include_str!("../../../SQL/billing/customers/insert.sql")
    }

    #[inline]
    pub fn update_query() -> &'static str {
        include_str!("../../../SQL/billing/customers/update.sql")
    }

    #[inline]
    pub fn delete_query() -> &'static str {
        include_str!("../../../SQL/billing/customers/delete.sql")
    }

    #[inline]
    pub fn phone_taken_query() -> &'static str {
        include_str!("../../../SQL/billing/customers/phone_taken.sql")
    }
}
