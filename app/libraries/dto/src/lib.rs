pub mod auth;
pub mod bill;
pub mod customer;
pub mod pagination;
pub mod patch;
pub mod rules;
