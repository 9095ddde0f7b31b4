use actix_web::http::{header::LOCATION, StatusCode};
use actix_web::{HttpResponse, ResponseError};

/// Short-circuits a request with `303 See Other` to a fixed path.
#[derive(Debug, thiserror::Error)]
#[error("redirect to {location}")]
pub struct Redirect {
    location: String,
}

impl Redirect {
    pub fn to<I: Into<String>>(location: I) -> Self {
        Self {
            location: location.into(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

impl ResponseError for Redirect {
    fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    fn error_response(&self) -> HttpResponse {
        see_other(&self.location)
    }
}

pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_sets_location() {
        let redirect = Redirect::to("/products");
        assert_eq!(redirect.location(), "/products");

        let response = redirect.error_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers().get(LOCATION).unwrap().to_str().unwrap(),
            "/products"
        );
    }
}
