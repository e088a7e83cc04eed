pub mod catalog;
pub mod entities;
pub mod value_objects;

pub use catalog::*;
pub use entities::*;
pub use value_objects::*;
