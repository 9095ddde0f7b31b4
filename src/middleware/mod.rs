pub mod authentication;
pub mod identity;

pub use identity::{AdminUser, AuthUser};
