use app_dto::auth::user::{NewUser, UserCreate};
use app_error::AppError;
use app_schema::auth::users::Role;
use app_state::AppState;
use tracing::*;
use validator::Validate;

/// Creates the configured admin account when it does not exist yet.
/// Returns `true` if an account was created.
pub async fn ensure_bootstrap_admin(state: &AppState) -> Result<bool, AppError> {
    let username = &state.config.bootstrap_admin_username;
    if state.store.get_user(username).await?.is_some() {
        debug!("Bootstrap admin {} already exists", username);
        return Ok(false);
    }
    let admin = UserCreate {
        username: username.clone(),
        password: state.config.bootstrap_admin_password.clone(),
        role: Role::Admin,
    };
    admin.validate()?;
    let hashed_password = state.hasher.hash(&admin.password)?;
    state
        .store
        .create_user(NewUser {
            username: admin.username,
            hashed_password,
            role: admin.role,
        })
        .await?;
    warn!("Created bootstrap admin {}", username);
    Ok(true)
}
