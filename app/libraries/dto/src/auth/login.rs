use serde::{Deserialize, Serialize};

pub const PASSWORD_GRANT: &str = "password";

/// OAuth2 password-grant form posted to `/token`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub grant_type: Option<String>,
}

impl TokenRequest {
    pub fn has_valid_grant(&self) -> bool {
        self.grant_type
            .as_deref()
            .is_none_or(|grant| grant == PASSWORD_GRANT)
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl TokenResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_owned(),
            expires_in,
        }
    }
}
