pub mod admin;
pub mod favorite;
mod health_checks;
pub mod product;
pub mod review;

pub use health_checks::*;
