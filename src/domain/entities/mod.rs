pub mod customer;
pub mod membership;
pub mod user;
pub mod timestamp;
