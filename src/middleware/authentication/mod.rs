mod getheader;
mod manager;
mod manager_middleware;
pub mod method;

pub use getheader::*;
pub use manager::*;
pub use manager_middleware::*;

use crate::helpers::TtlCache;
use crate::models;

/// Tokens already resolved by the identity provider.
pub type AuthCache = TtlCache<models::User>;
