use app_dto::auth::user::{NewUser, UserCreate};
use app_error::AppError;
use app_middleware::{Action, CurrentUser, authorize};
use app_schema::auth::users::User;
use app_state::AppState;
use axum::extract::{Extension, Json, State, rejection::JsonRejection};
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tracing::*;
use validator::Validate;

pub async fn get_me(Extension(user): Extension<CurrentUser>) -> Json<CurrentUser> {
    Json(user)
}

pub async fn post_user(
    State(state): State<Arc<AppState>>,
    Extension(admin): Extension<CurrentUser>,
    payload: Result<Json<UserCreate>, JsonRejection>,
) -> Result<Json<User>, AppError> {
    authorize(&admin, Action::CreateUser)?;
    let Json(args) = payload?;
    args.validate()?;
    let hasher = state.hasher.clone();
    let password = args.password;
    let hashed_password = spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(AppError::internal)??;
    let user = state
        .store
        .create_user(NewUser {
            username: args.username,
            hashed_password,
            role: args.role,
        })
        .await?;
    info!(
        "{} created user {} ({})",
        &admin.username, &user.username, user.role
    );
    Ok(Json(user))
}
