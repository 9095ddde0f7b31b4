//! Extractors that gate handlers on the identity resolved by
//! `authentication::Manager`. Both answer a failed check with a redirect.

use crate::configuration::Settings;
use crate::helpers::{JsonResponse, Redirect};
use crate::models;
use actix_web::{dev::Payload, web, Error, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use std::ops::Deref;
use std::sync::Arc;

/// Where callers without an identity are sent.
pub const SIGNED_OUT_REDIRECT: &str = "/";
/// Where signed-in callers without admin rights are sent.
pub const NOT_ADMIN_REDIRECT: &str = "/";

/// Any signed-in user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Arc<models::User>);

/// The signed-in user whose id matches the configured admin id.
#[derive(Debug, Clone)]
pub struct AdminUser(pub Arc<models::User>);

fn current_user(req: &HttpRequest) -> Option<Arc<models::User>> {
    req.extensions().get::<Arc<models::User>>().cloned()
}

impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match current_user(req) {
            Some(user) => Ok(AuthUser(user)),
            None => {
                tracing::debug!("No identity for {}, redirecting", req.path());
                Err(Redirect::to(SIGNED_OUT_REDIRECT).into())
            }
        };
        ready(result)
    }
}

impl FromRequest for AdminUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let settings = match req.app_data::<web::Data<Settings>>() {
            Some(settings) => settings,
            None => {
                return ready(Err(JsonResponse::<models::User>::build()
                    .internal_server_error("settings are not configured")))
            }
        };

        let result = match current_user(req) {
            Some(user) if settings.is_admin(&user.id) => Ok(AdminUser(user)),
            Some(user) => {
                tracing::warn!("User {} is not allowed on {}", user.id, req.path());
                Err(Redirect::to(NOT_ADMIN_REDIRECT).into())
            }
            None => Err(Redirect::to(SIGNED_OUT_REDIRECT).into()),
        };
        ready(result)
    }
}

impl Deref for AuthUser {
    type Target = models::User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Deref for AdminUser {
    type Target = models::User;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
