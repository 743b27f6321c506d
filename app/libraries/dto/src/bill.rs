use crate::{
    patch::Patch,
    rules::{self, check_not_null, check_patch},
};
use app_schema::bill::{Bill, BillStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct BillCreate {
    pub customer_id: i64,
    pub billing_date: NaiveDate,
    pub due_date: NaiveDate,
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    pub status: BillStatus,
}

/// Body of `PUT /bills/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BillPatch {
    #[serde(default)]
    pub customer_id: Patch<i64>,
    #[serde(default)]
    pub billing_date: Patch<NaiveDate>,
    #[serde(default)]
    pub due_date: Patch<NaiveDate>,
    #[serde(default)]
    pub amount: Patch<f64>,
    #[serde(default)]
    pub status: Patch<BillStatus>,
}

impl BillPatch {
    pub fn apply(self, bill: &mut Bill) {
        self.customer_id.merge_into(&mut bill.customer_id);
        self.billing_date.merge_into(&mut bill.billing_date);
        self.due_date.merge_into(&mut bill.due_date);
        self.amount.merge_into(&mut bill.amount);
        self.status.merge_into(&mut bill.status);
    }
}

impl Validate for BillPatch {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        check_not_null(&mut errors, "customer_id", &self.customer_id);
        check_not_null(&mut errors, "billing_date", &self.billing_date);
        check_not_null(&mut errors, "due_date", &self.due_date);
        check_patch(&mut errors, "amount", &self.amount, rules::amount);
        check_not_null(&mut errors, "status", &self.status);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
