pub mod favorite;
pub mod image;
pub mod product;
pub mod review;
pub mod user;

pub use favorite::ToggleFavorite;
pub use image::{ImageFile, ImageForm, UpdateImageForm};
pub use product::{NewProductForm, ProductForm};
pub use review::ReviewForm;
pub use user::UserForm;
