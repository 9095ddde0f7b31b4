use actix_web::dev::ServiceRequest;

/// Cookie the storefront pages carry the session token in.
pub const SESSION_COOKIE: &str = "access_token";

#[tracing::instrument(name = "Authenticate with cookie", skip(req))]
pub async fn try_cookie(req: &mut ServiceRequest) -> Result<bool, String> {
    let token = match req.cookie(SESSION_COOKIE) {
        Some(cookie) if !cookie.value().is_empty() => cookie.value().to_string(),
        _ => return Ok(false),
    };

    tracing::debug!("Found {} in cookies", SESSION_COOKIE);
    super::f_oauth::authenticate(req, token).await
}
