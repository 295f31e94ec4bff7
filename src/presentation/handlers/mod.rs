pub mod account;
pub mod auth;
pub mod generate;
pub mod pantry;
pub mod recipe;
