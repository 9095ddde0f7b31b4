pub mod favorite;
pub mod product;
pub mod review;
