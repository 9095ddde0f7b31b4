mod f_cookie;
mod f_oauth;

pub use f_cookie::{try_cookie, SESSION_COOKIE};
pub use f_oauth::{fetch_user, try_extract_token, try_oauth};
