pub mod admin;
pub mod auth;
pub mod cart;
pub mod categories;
pub mod games;
pub mod orders;
pub mod reviews;
pub mod users;
