pub mod error;
pub mod ingredient;
pub mod recipe;
pub mod user;
pub mod validation;
