pub use jsonwebtoken::Algorithm;
use jsonwebtoken::errors::Error;
pub use jsonwebtoken::errors::ErrorKind as JWTErrorKind;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, TokenData, Validation, decode as jdec, encode as jenc,
};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

/// Access token claims; `sub` is the username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(sub: impl Into<String>, lifetime: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: sub.into(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }
}

pub fn generate_token<T>(algorithm: Algorithm, key: &str, claims: T) -> Result<String, Error>
where
    T: Serialize,
{
    jenc(
        &Header::new(algorithm),
        &claims,
        &EncodingKey::from_secret(key.as_bytes()),
    )
}

pub fn validate_token<T>(
    algorithm: Algorithm,
    key: &str,
    token: &str,
) -> Result<TokenData<T>, Error>
where
    for<'a> T: Deserialize<'a>,
{
    let mut validation = Validation::new(algorithm);
    validation.set_required_spec_claims(&["exp", "sub"]);
    jdec::<T>(
        token,
        &DecodingKey::from_secret(key.as_bytes()),
        &validation,
    )
}

#[cfg(test)]
mod test {
    use super::*;

    const SECRET: &str = "unit-test-secret";

    #[test]
    fn check_jwt_functions() {
        let claims = Claims::new("operator1", Duration::minutes(30));
        let token = generate_token(Algorithm::HS256, SECRET, &claims).unwrap();
        let validate = validate_token::<Claims>(Algorithm::HS256, SECRET, &token).unwrap();
        assert_eq!(validate.claims.sub, "operator1");
        assert!(validate.claims.exp > validate.claims.iat);
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims::new("operator1", Duration::hours(-2));
        let token = generate_token(Algorithm::HS256, SECRET, &claims).unwrap();
        let error = validate_token::<Claims>(Algorithm::HS256, SECRET, &token).err();
        assert_eq!(error.unwrap().kind(), &JWTErrorKind::ExpiredSignature)
    }

    #[test]
    fn wrong_key_is_rejected() {
        let claims = Claims::new("admin", Duration::minutes(5));
        let token = generate_token(Algorithm::HS256, SECRET, &claims).unwrap();
        let error = validate_token::<Claims>(Algorithm::HS256, "other", &token).err();
        assert_eq!(error.unwrap().kind(), &JWTErrorKind::InvalidSignature)
    }

    #[test]
    fn plain_username_is_not_a_token() {
        assert!(validate_token::<Claims>(Algorithm::HS256, SECRET, "admin").is_err());
    }
}
