use axum::{
    Json,
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use bcrypt::BcryptError;
use jsonwebtoken::errors::Error as JwtError;
use log::{error, warn};
use serde::Serialize;
use serde_json::{Error as JsonError, Value};
use sqlx::Error as SqlxError;
use std::{error::Error as StdError, fmt, io::Error as IoError};
use validator::ValidationErrors;

pub static SYSTEM_ERROR_CODE: i64 = -1000;
pub static SYSTEM_ERROR_CODE_DB: i64 = -1001;
pub static SYSTEM_ERROR_CODE_IO: i64 = -1002;
pub static SYSTEM_ERROR_CODE_CRYPTO: i64 = -1003;
pub static SYSTEM_ERROR_CODE_JSON: i64 = -1004;

pub static VALIDATION_ERROR_CODE: i64 = 1;
pub static AUTHENTICATION_ERROR_CODE: i64 = 2;
pub static AUTHORIZATION_ERROR_CODE: i64 = 3;
pub static NOT_FOUND_ERROR_CODE: i64 = 4;
pub static CONFLICT_ERROR_CODE: i64 = 5;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, Serialize)]
pub struct AppError {
    pub message: String,
    #[serde(serialize_with = "serialize_status")]
    pub status: StatusCode,
    pub code: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

fn serialize_status<S>(status: &StatusCode, s: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    s.serialize_u16(status.as_u16())
}

impl AppError {
    pub fn new(message: impl Into<String>, status: StatusCode, code: i64) -> Self {
        Self {
            message: message.into(),
            status,
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST, VALIDATION_ERROR_CODE)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::BAD_REQUEST, CONFLICT_ERROR_CODE)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::NOT_FOUND, NOT_FOUND_ERROR_CODE)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::UNAUTHORIZED, AUTHENTICATION_ERROR_CODE)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(message, StatusCode::FORBIDDEN, AUTHORIZATION_ERROR_CODE)
    }

    /// The detail goes to the log only; clients get a generic message.
    pub fn internal(detail: impl fmt::Display) -> Self {
        Self::internal_with_code(detail, SYSTEM_ERROR_CODE)
    }

    fn internal_with_code(detail: impl fmt::Display, code: i64) -> Self {
        error!("Internal error ({code}): {detail}");
        Self::new(INTERNAL_MESSAGE, StatusCode::INTERNAL_SERVER_ERROR, code)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            r#"{{"message":"{}","status":{},"code":{}}}"#,
            self.message,
            self.status.as_u16(),
            self.code
        )
    }
}

impl StdError for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        warn!(
            "AppError ({}): {} (HTTP {})",
            self.code,
            self.message,
            self.status.as_u16()
        );
        let status = self.status;
        let mut response = (status, Json(self)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

// --------------------
// Error conversions
// --------------------

impl From<SqlxError> for AppError {
    fn from(value: SqlxError) -> Self {
        if let SqlxError::Database(db) = &value {
            if db.is_unique_violation() {
                return Self::conflict(format!(
                    "Duplicate value violates {}",
                    db.constraint().unwrap_or("a unique constraint")
                ));
            }
        }
        Self::internal_with_code(format!("{value:?}"), SYSTEM_ERROR_CODE_DB)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        let details = serde_json::to_value(&value).unwrap_or(Value::Null);
        Self::validation(value.to_string()).with_details(details)
    }
}

impl From<JsonRejection> for AppError {
    fn from(value: JsonRejection) -> Self {
        Self::validation(value.body_text())
    }
}

impl From<FormRejection> for AppError {
    fn from(value: FormRejection) -> Self {
        Self::validation(value.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        Self::validation(value.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(value: PathRejection) -> Self {
        Self::validation(value.body_text())
    }
}

impl From<IoError> for AppError {
    fn from(value: IoError) -> Self {
        Self::internal_with_code(format!("{value:?}"), SYSTEM_ERROR_CODE_IO)
    }
}

impl From<JsonError> for AppError {
    fn from(value: JsonError) -> Self {
        Self::internal_with_code(format!("{value:?}"), SYSTEM_ERROR_CODE_JSON)
    }
}

impl From<JwtError> for AppError {
    fn from(value: JwtError) -> Self {
        Self::internal_with_code(format!("{value:?}"), SYSTEM_ERROR_CODE_CRYPTO)
    }
}

impl From<BcryptError> for AppError {
    fn from(value: BcryptError) -> Self {
        Self::internal_with_code(format!("{value:?}"), SYSTEM_ERROR_CODE_CRYPTO)
    }
}
