use crate::UnknownVariant;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Paid,
    Unpaid,
    Overdue,
}

impl BillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Unpaid => "unpaid",
            Self::Overdue => "overdue",
        }
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BillStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "paid" => Ok(Self::Paid),
            "unpaid" => Ok(Self::Unpaid),
            "overdue" => Ok(Self::Overdue),
            other => Err(UnknownVariant {
                kind: "bill status",
                value: other.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for BillStatus {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Bill {
    pub bill_id: i64,
    pub customer_id: i64,
    pub billing_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount: f64,
    #[sqlx(try_from = "String")]
    pub status: BillStatus,
}

impl Bill {
    #[inline]
    pub fn create_table_query() -> &'static str {
        include_str!("../../../SQL/billing/bills/create_table.sql")
    }

    #[inline]
    pub fn create_index_query() -> &'static str {
        include_str!("../../../SQL/billing/bills/create_index.sql")
    }

    #[inline]
    pub fn select_query() -> &'static str {
        include_str!("../../../SQL/billing/bills/select_base.sql")
    }

    #[inline]
    pub fn insert_query() -> &'static str {
        include_str!("../../../SQL/billing/bills/insert.sql")
    }

    #[inline]
    pub fn update_query() -> &'static str {
        include_str!("../../../SQL/billing/bills/update.sql")
    }

    #[inline]
    pub fn delete_query() -> &'static str {
        include_str!("../../../SQL/billing/bills/delete.sql")
    }

    #[inline]
    pub fn delete_by_customer_query() -> &'static str {
        include_str!("../../../SQL/billing/bills/delete_by_customer.sql")
    }
}
