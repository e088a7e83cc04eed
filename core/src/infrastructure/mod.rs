pub mod detector;
pub mod identity;
pub mod llm;
