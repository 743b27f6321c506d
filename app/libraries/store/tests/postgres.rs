//! Runs against a live PostgreSQL named by `DATABASE_URL`:
//! `cargo test -p app_store -- --ignored`

use app_dto::{
    bill::{BillCreate, BillPatch},
    customer::{CustomerCreate, CustomerPatch},
    pagination::Pagination,
};
use app_schema::bill::BillStatus;
use app_store::{BillingStore, PgStore};
use chrono::NaiveDate;
use serde_json::json;
use sqlx::postgres::PgPoolOptions;
use std::time::{SystemTime, UNIX_EPOCH};

async fn store() -> PgStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .unwrap();
    let store = PgStore::new(pool);
    store.migrate().await.unwrap();
    store
}

fn unique_phone() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{:015}", nanos % 1_000_000_000_000_000)
}

fn customer(phone_number: String) -> CustomerCreate {
    CustomerCreate {
        name: "Meera Iyer".to_owned(),
        phone_number,
        email: "meera@example.com".to_owned(),
        address: "7 Lake View".to_owned(),
    }
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn customer_round_trip_and_cascade() {
    let store = store().await;
    let created = store.create_customer(customer(unique_phone())).await.unwrap();
    let fetched = store.get_customer(created.customer_id).await.unwrap();
    assert_eq!(fetched, Some(created.clone()));

    for _ in 0..3 {
        store
            .create_bill(BillCreate {
                customer_id: created.customer_id,
                billing_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
                due_date: NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
                amount: 150.0,
                status: BillStatus::Unpaid,
            })
            .await
            .unwrap();
    }
    store.delete_customer(created.customer_id).await.unwrap();

    let remaining = store
        .list_bills(Pagination::new(0, 1000))
        .await
        .unwrap()
        .into_iter()
        .filter(|b| b.customer_id == created.customer_id)
        .count();
    assert_eq!(remaining, 0);
    assert!(store.get_customer(created.customer_id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn duplicate_phone_is_rejected() {
    let store = store().await;
    let phone = unique_phone();
    store.create_customer(customer(phone.clone())).await.unwrap();
    let err = store.create_customer(customer(phone)).await.unwrap_err();
    assert_eq!(err.code, app_error::CONFLICT_ERROR_CODE);
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn email_patch_keeps_other_columns() {
    let store = store().await;
    let created = store.create_customer(customer(unique_phone())).await.unwrap();
    let patch: CustomerPatch =
        serde_json::from_value(json!({"email": "meera.iyer@example.com"})).unwrap();
    let updated = store
        .update_customer(created.customer_id, patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.email, "meera.iyer@example.com");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.phone_number, created.phone_number);
    assert_eq!(updated.address, created.address);
    let fetched = store.get_customer(created.customer_id).await.unwrap();
    assert_eq!(fetched, Some(updated));
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn phone_change_to_taken_number_is_rejected() {
    let store = store().await;
    let first = store.create_customer(customer(unique_phone())).await.unwrap();
    let second = store.create_customer(customer(unique_phone())).await.unwrap();
    let patch: CustomerPatch =
        serde_json::from_value(json!({"phone_number": first.phone_number})).unwrap();
    let err = store
        .update_customer(second.customer_id, patch)
        .await
        .unwrap_err();
    assert_eq!(err.code, app_error::CONFLICT_ERROR_CODE);
    let unchanged = store.get_customer(second.customer_id).await.unwrap();
    assert_eq!(unchanged, Some(second));
}

#[tokio::test]
#[ignore = "needs DATABASE_URL"]
async fn bill_status_patch_keeps_other_columns() {
    let store = store().await;
    let created = store
        .create_bill(BillCreate {
            customer_id: 1,
            billing_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
            amount: 499.5,
            status: BillStatus::Unpaid,
        })
        .await
        .unwrap();
    let patch: BillPatch = serde_json::from_value(json!({"status": "paid"})).unwrap();
    let updated = store
        .update_bill(created.bill_id, patch)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, BillStatus::Paid);
    assert_eq!(updated.customer_id, created.customer_id);
    assert_eq!(updated.billing_date, created.billing_date);
    assert_eq!(updated.due_date, created.due_date);
    assert_eq!(updated.amount, created.amount);
    store.delete_bill(created.bill_id).await.unwrap();
}
