pub mod authentication;
pub mod common;
pub mod detection;
pub mod ingestion;
pub mod meal_analysis;
pub mod nutrition;
