pub mod cache;
pub(crate) mod json;
pub mod redirect;

pub use cache::{PageCache, TtlCache};
pub use json::*;
pub use redirect::{see_other, Redirect};
