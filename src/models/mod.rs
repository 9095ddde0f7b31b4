mod favorite;
mod product;
mod review;
pub mod user;

pub use favorite::*;
pub use product::*;
pub use review::*;
pub use user::*;
