pub mod account_service;
pub mod generation_service;
pub mod pantry_service;
pub mod recipe_service;
