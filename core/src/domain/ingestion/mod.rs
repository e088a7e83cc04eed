pub mod entities;
pub mod services;

#[cfg(test)]
pub(crate) mod test_utils;

pub use entities::*;
pub use services::*;
