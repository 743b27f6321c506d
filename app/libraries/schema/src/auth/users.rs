use crate::UnknownVariant;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operator => "operator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "operator" => Ok(Self::Operator),
            other => Err(UnknownVariant {
                kind: "role",
                value: other.to_owned(),
            }),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownVariant;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A dashboard account. The password hash is never serialized.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub username: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    pub is_active: bool,
}

impl User {
    #[inline]
    pub fn create_table_query() -> &'static str {
        include_str!("../../../../SQL/billing/users/create_table.sql")
    }

    #[inline]
    pub fn select_query() -> &'static str {
        include_str!("../../../../SQL/billing/users/select_base.sql")
    }

    #[inline]
    pub fn insert_query() -> &'static str {
        include_str!("../../../../SQL/billing/users/insert.sql")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            username: "admin".to_owned(),
            hashed_password: "$2b$04$abc".to_owned(),
            role: Role::Admin,
            is_active: true,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("hashed_password").is_none());
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn role_parsing() {
        assert_eq!(Role::try_from("operator".to_owned()), Ok(Role::Operator));
        assert!("Admin".parse::<Role>().is_err());
    }
}
