use app_dto::{
    customer::{CustomerCreate, CustomerPatch},
    pagination::Pagination,
};
use app_error::AppError;
use app_middleware::{Action, CurrentUser, authorize};
use app_schema::customer::Customer;
use app_state::AppState;
use axum::extract::{
    Extension, Json, Path, Query, State,
    rejection::{JsonRejection, PathRejection, QueryRejection},
};
use std::sync::Arc;
use tracing::*;
use validator::Validate;

fn customer_not_found() -> AppError {
    AppError::not_found("Customer not found")
}

pub async fn post_customer(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    payload: Result<Json<CustomerCreate>, JsonRejection>,
) -> Result<Json<Customer>, AppError> {
    authorize(&user, Action::CreateCustomer)?;
    let Json(args) = payload?;
    args.validate()?;
    let customer = state.store.create_customer(args).await?;
    info!(
        "{} created customer {}",
        &user.username, customer.customer_id
    );
    Ok(Json(customer))
}

pub async fn get_customers(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    page: Result<Query<Pagination>, QueryRejection>,
) -> Result<Json<Vec<Customer>>, AppError> {
    authorize(&user, Action::ListCustomers)?;
    let Query(page) = page?;
    let res = state.store.list_customers(page).await?;
    debug!("Listed {} customers", res.len());
    Ok(Json(res))
}

pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    customer_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Customer>, AppError> {
    authorize(&user, Action::ReadCustomer)?;
    let Path(customer_id) = customer_id?;
    state
        .store
        .get_customer(customer_id)
        .await?
        .map(Json)
        .ok_or_else(customer_not_found)
}

pub async fn put_customer(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    customer_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CustomerPatch>, JsonRejection>,
) -> Result<Json<Customer>, AppError> {
    authorize(&user, Action::UpdateCustomer)?;
    let Path(customer_id) = customer_id?;
    let Json(patch) = payload?;
    patch.validate()?;
    if patch.is_empty() {
        return state
            .store
            .get_customer(customer_id)
            .await?
            .map(Json)
            .ok_or_else(customer_not_found);
    }
    let customer = state
        .store
        .update_customer(customer_id, patch)
        .await?
        .ok_or_else(customer_not_found)?;
    info!("{} updated customer {}", &user.username, customer_id);
    Ok(Json(customer))
}

pub async fn delete_customer(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<CurrentUser>,
    customer_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Customer>, AppError> {
    authorize(&user, Action::DeleteCustomer)?;
    let Path(customer_id) = customer_id?;
    let customer = state
        .store
        .delete_customer(customer_id)
        .await?
        .ok_or_else(customer_not_found)?;
    info!("{} deleted customer {}", &user.username, customer_id);
    Ok(Json(customer))
}
