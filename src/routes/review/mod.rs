mod add;
mod delete;
mod get;

pub use add::*;
pub use delete::*;
pub use get::*;

/// The signed-in user's own reviews page.
pub const REVIEWS_PATH: &str = "/reviews";

pub fn product_path(id: &uuid::Uuid) -> String {
    format!("{}/{}", crate::routes::product::PRODUCTS_PATH, id)
}
