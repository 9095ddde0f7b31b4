mod add;
mod delete;
mod get;
mod update;

pub use add::*;
pub use delete::*;
pub use get::*;
pub use update::*;

/// Landing page of the admin console.
pub const ADMIN_PRODUCTS_PATH: &str = "/admin/products";

pub fn edit_path(id: &uuid::Uuid) -> String {
    format!("{}/{}/edit", ADMIN_PRODUCTS_PATH, id)
}
