use app_dto::{
    bill::{BillCreate, BillPatch},
    pagination::Pagination,
};
use app_error::AppError;
use app_middleware::{Action, CurrentUser, authorize};
use app_schema::bill::Bill;
use app_state::AppState;
use axum::extract::{
    Extension, Json, Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
};
use std::sync::Arc;
use tracing::*;
use validator::Validate;

fn bill_not_found() -> AppError {
    AppError::not_found("Bill not found")
}

pub async fn post_bill(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<BillCreate>, JsonRejection>,
) -> Result<Json<Bill>, AppError> {
    authorize(&user, Action::CreateBill)?;
    let Json(args) = payload?;
    args.validate()?;
    let bill = state.store.create_bill(args).await?;
    info!(
        "{} created bill {} for customer {}",
        &user.username, bill.bill_id, bill.customer_id
    );
    Ok(Json(bill))
}

pub async fn get_bills(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    page: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Bill>>, AppError> {
    authorize(&user, Action::ListBills)?;
    let Query(page) = page?;
    let res = state.store.list_bills(page).await?;
    debug!("Listed {} bills", res.len());
    Ok(Json(res))
}

pub async fn get_bill(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    bill_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Bill>, AppError> {
    authorize(&user, Action::ReadBill)?;
    let Path(bill_id) = bill_id?;
    state
        .store
        .get_bill(bill_id)
        .await?
        .map(Json)
        .ok_or_else(bill_not_found)
}

pub async fn put_bill(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    bill_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<BillPatch>, JsonRejection>,
) -> Result<Json<Bill>, AppError> {
    authorize(&user, Action::UpdateBill)?;
    let Path(bill_id) = bill_id?;
    let Json(patch) = payload?;
    patch.validate()?;
    let bill = state
        .store
        .update_bill(bill_id, patch)
        .await?
        .ok_or_else(bill_not_found)?;
    info!("{} updated bill {}", &user.username, bill_id);
    Ok(Json(bill))
}

pub async fn delete_bill(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    bill_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Bill>, AppError> {
    authorize(&user, Action::DeleteBill)?;
    let Path(bill_id) = bill_id?;
    let bill = state
        .store
        .delete_bill(bill_id)
        .await?
        .ok_or_else(bill_not_found)?;
    info!("{} deleted bill {}", &user.username, bill_id);
    Ok(Json(bill))
}
