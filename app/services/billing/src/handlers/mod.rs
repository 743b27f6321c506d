pub mod bill;
pub mod customer;
pub mod index;
pub mod login;
pub mod user;
