use app_cryptography::jwt::{Algorithm, Claims, generate_token};
use app_dto::auth::login::{TokenRequest, TokenResponse};
use app_error::AppError;
use app_state::AppState;
use axum::extract::{Form, Json, State, rejection::FormRejection};
use std::sync::Arc;
use tokio::task::spawn_blocking;
use tracing::*;

const AUTH_FAILED_MESSAGE: &str = "Incorrect username or password";

pub async fn post_token(
    State(state): State<Arc<AppState>>,
    payload: Result<Form<TokenRequest>, FormRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let Form(args) = payload?;
    if !args.has_valid_grant() {
        return Err(AppError::validation("grant_type must be \"password\""));
    }
    // Unknown user, wrong password and inactive account all look the same.
    let user = state.store.get_user(&args.username).await?;
    let hasher = state.hasher.clone();
    let hashed_password = user.as_ref().map(|u| u.hashed_password.clone());
    let password = args.password;
    let verified = spawn_blocking(move || match hashed_password {
        Some(hashed) => hasher.verify(&password, &hashed),
        None => Ok(hasher.verify_absent(&password)),
    })
    .await
    .map_err(AppError::internal)??;
    let Some(user) = user.filter(|u| verified && u.is_active) else {
        info!("Failed login attempt");
        return Err(AppError::unauthorized(AUTH_FAILED_MESSAGE));
    };
    let lifetime = state.access_token_lifetime();
    let claims = Claims::new(&user.username, lifetime);
    let access_token = generate_token(Algorithm::HS256, &state.config.jwt_access_key, &claims)?;
    info!("User {} logged in", &user.username);
    Ok(Json(TokenResponse::bearer(
        access_token,
        lifetime.num_seconds(),
    )))
}
