use crate::configuration::Settings;
use crate::forms;
use crate::middleware::authentication::{get_header, AuthCache};
use crate::models;
use actix_web::{dev::ServiceRequest, web, HttpMessage};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use std::sync::Arc;

pub fn try_extract_token(authentication: String) -> Result<String, String> {
    let mut authentication_parts = authentication.splitn(2, ' ');
    match authentication_parts.next() {
        Some("Bearer") => {}
        _ => return Err("Bearer missing scheme".to_string()),
    }

    match authentication_parts.next().map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => {
            tracing::error!("Bearer token is missing");
            Err("Authentication required".to_string())
        }
    }
}

#[tracing::instrument(name = "Authenticate with bearer token", skip(req))]
pub async fn try_oauth(req: &mut ServiceRequest) -> Result<bool, String> {
    let authentication = match get_header::<String>(req, "authorization")? {
        Some(authentication) => authentication,
        None => return Ok(false),
    };

    let token = try_extract_token(authentication)?;
    authenticate(req, token).await
}

/// Resolves `token` into a user and stores it in the request extensions.
/// A token the provider refuses leaves the request anonymous.
pub(super) async fn authenticate(req: &mut ServiceRequest, token: String) -> Result<bool, String> {
    let settings = req
        .app_data::<web::Data<Settings>>()
        .ok_or("settings are not configured".to_string())?
        .clone();
    let http_client = req
        .app_data::<web::Data<reqwest::Client>>()
        .ok_or("http client is not configured".to_string())?
        .clone();
    let cache = req
        .app_data::<web::Data<AuthCache>>()
        .ok_or("auth cache is not configured".to_string())?
        .clone();

    let user = match cache.get(&token).await {
        Some(user) => user,
        None => {
            match fetch_user(http_client.get_ref(), settings.auth_url.as_str(), &token).await? {
                Some(user) => {
                    cache.insert(token, user.clone()).await;
                    user
                }
                None => return Ok(false),
            }
        }
    };

    tracing::debug!("Authenticated user {}", user.id);
    if req.extensions_mut().insert(Arc::new(user)).is_some() {
        return Err("user already logged".to_string());
    }

    Ok(true)
}

/// `Ok(None)` when the provider rejects the token.
pub async fn fetch_user(
    client: &reqwest::Client,
    auth_url: &str,
    token: &str,
) -> Result<Option<models::User>, String> {
    let resp = client
        .get(auth_url)
        .bearer_auth(token)
        .header(CONTENT_TYPE, "application/json")
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|err| {
            tracing::error!(target: "auth", error = %err, "Identity request failed");
            "No response from identity provider".to_string()
        })?;

    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        tracing::debug!("Identity provider rejected the token: {}", status);
        return Ok(None);
    }
    if !status.is_success() {
        tracing::error!("Identity provider answered {}", status);
        return Err("Identity provider error".to_string());
    }

    resp.json::<forms::UserForm>()
        .await
        .map_err(|_err| "can't parse the response body".to_string())?
        .try_into()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(
            try_extract_token("Bearer abc.def".to_string()),
            Ok("abc.def".to_string())
        );
        assert!(try_extract_token("Basic abc".to_string()).is_err());
        assert!(try_extract_token("Bearer ".to_string()).is_err());
        assert!(try_extract_token("Bearer".to_string()).is_err());
    }

    #[tokio::test]
    async fn fetch_user_resolves_identity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .and(header("authorization", "Bearer good"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user": {"_id": "user_1", "first_name": "Ada", "email": "ada@example.com"}
            })))
            .mount(&server)
            .await;

        let user = fetch_user(&reqwest::Client::new(), &format!("{}/me", server.uri()), "good")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, "user_1");
    }

    #[tokio::test]
    async fn rejected_token_is_anonymous() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let user = fetch_user(&reqwest::Client::new(), &format!("{}/me", server.uri()), "bad")
            .await
            .unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn provider_failure_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = fetch_user(&reqwest::Client::new(), &format!("{}/me", server.uri()), "x").await;
        assert_eq!(result, Err("Identity provider error".to_string()));
    }
}
