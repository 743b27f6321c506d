//! Persisted entities of the billing database and the SQL that reads and
//! writes them.

pub mod auth;
pub mod bill;
pub mod customer;

use thiserror::Error;

/// A stored text column held a value outside its enumeration.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}
