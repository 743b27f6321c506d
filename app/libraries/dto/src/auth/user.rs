use app_schema::auth::users::Role;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct UserCreate {
    #[validate(length(min = 4, max = 50))]
    pub username: String,
    #[serde(skip_serializing)]
    #[validate(length(min = 8))]
    pub password: String,
    pub role: Role,
}

/// A validated user with the password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub hashed_password: String,
    pub role: Role,
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn username_and_password_lengths() {
        let ok: UserCreate = serde_json::from_value(json!({
            "username": "op01", "password": "12345678", "role": "operator"
        }))
        .unwrap();
        assert!(ok.validate().is_ok());

        let bad: UserCreate = serde_json::from_value(json!({
            "username": "op", "password": "short", "role": "admin"
        }))
        .unwrap();
        let errors = bad.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
        assert!(errors.field_errors().contains_key("password"));
    }

    #[test]
    fn unknown_role_fails_to_parse() {
        let result = serde_json::from_value::<UserCreate>(json!({
            "username": "root", "password": "12345678", "role": "superuser"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn password_is_not_echoed() {
        let user: UserCreate = serde_json::from_value(json!({
            "username": "op01", "password": "12345678", "role": "operator"
        }))
        .unwrap();
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
    }
}
