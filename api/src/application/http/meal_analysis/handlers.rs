pub mod analyze_meal;
pub mod detect_food;
