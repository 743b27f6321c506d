pub mod policy;

pub use policy::{Action, authorize};

use app_cryptography::jwt::{Algorithm, Claims, validate_token};
use app_error::AppError;
use app_schema::auth::users::{Role, User};
use app_state::AppState;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::*;

const NOT_AUTHENTICATED: &str = "Could not validate credentials";

/// The user a request's bearer token resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub username: String,
    pub role: Role,
    pub is_active: bool,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            role: user.role,
            is_active: user.is_active,
        }
    }
}

/// Returns the token of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let mut parts = value.split_whitespace();
    let scheme = parts.next()?;
    let token = parts.next()?;
    if !scheme.eq_ignore_ascii_case("bearer") || parts.next().is_some() {
        return None;
    }
    Some(token.to_owned())
}

pub async fn web_auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    debug!(
        "Authorization Middleware Running for {} {}",
        req.method(),
        req.uri()
    );

    // Owned so `req` is free to be mutated below.
    let token = bearer_token(req.headers())
        .ok_or_else(|| AppError::unauthorized("Not authenticated"))?;

    let claims = validate_token::<Claims>(
        Algorithm::HS256,
        &state.config.jwt_access_key,
        &token,
    )
    .map_err(|e| {
        debug!("Rejected access token: {}", e);
        AppError::unauthorized(NOT_AUTHENTICATED)
    })?
    .claims;

    let user = match state.store.get_user(&claims.sub).await? {
        Some(user) if user.is_active => user,
        _ => return Err(AppError::unauthorized(NOT_AUTHENTICATED)),
    };

    debug!("User {} approved using access token", &user.username);
    req.extensions_mut().insert(CurrentUser::from(user));
    Ok(next.run(req).await)
}

#[cfg(test)]
mod test {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_parsing() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def".to_owned()));
        assert_eq!(bearer_token(&headers("bearer abc")), Some("abc".to_owned()));
        assert_eq!(bearer_token(&headers("Basic abc")), None);
        assert_eq!(bearer_token(&headers("Bearer")), None);
        assert_eq!(bearer_token(&headers("Bearer a b")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
