pub(crate) mod admin;
pub(crate) mod auth;
pub(crate) mod cart;
pub(crate) mod categories;
pub(crate) mod games;
pub(crate) mod orders;
pub(crate) mod reviews;
pub(crate) mod users;
