pub mod cart;
pub mod category;
pub mod game;
pub mod order;
pub mod payment;
pub mod review;
pub mod user;
