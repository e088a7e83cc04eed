pub mod health;
pub mod meal_analysis;
pub mod server;
pub mod user;
