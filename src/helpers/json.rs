use actix_web::error::InternalError;
use actix_web::http::StatusCode;
use actix_web::{web, Error, HttpResponse};
use serde_derive::Serialize;

/// Envelope every handler answers with. Failures carry only `message`.
#[derive(Serialize, Debug)]
pub struct JsonResponse<T> {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list: Option<Vec<T>>,
}

pub struct JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    message: String,
    id: Option<String>,
    item: Option<T>,
    list: Option<Vec<T>>,
}

impl<T> JsonResponseBuilder<T>
where
    T: serde::Serialize,
{
    pub fn set_msg<I: Into<String>>(mut self, msg: I) -> Self {
        self.message = msg.into();
        self
    }

    pub fn set_id<I: ToString>(mut self, id: I) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn set_item(mut self, item: T) -> Self {
        self.item = Some(item);
        self
    }

    pub fn set_list(mut self, list: Vec<T>) -> Self {
        self.list = Some(list);
        self
    }

    fn to_json_response(self) -> JsonResponse<T> {
        JsonResponse {
            message: self.message,
            id: self.id,
            item: self.item,
            list: self.list,
        }
    }

    pub fn to_string(self) -> String {
        serde_json::to_string(&self.to_json_response()).unwrap_or_default()
    }

    pub fn ok<I: Into<String>>(self, msg: I) -> web::Json<JsonResponse<T>> {
        web::Json(self.set_msg(msg).to_json_response())
    }

    /// Same body as `ok`, kept as a value so it can go into the page cache.
    pub fn to_value<I: Into<String>>(self, msg: I) -> serde_json::Value {
        serde_json::to_value(self.set_msg(msg).to_json_response())
            .unwrap_or(serde_json::Value::Null)
    }

    fn error<I: Into<String>>(self, status: StatusCode, msg: I) -> Error {
        let msg = msg.into();
        let body = self.set_msg(msg.clone()).to_json_response();
        InternalError::from_response(msg, HttpResponse::build(status).json(body)).into()
    }

    pub fn bad_request<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::BAD_REQUEST, msg)
    }

    /// Rejected form input.
    pub fn form_error<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::BAD_REQUEST, msg)
    }

    pub fn not_found<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::NOT_FOUND, msg)
    }

    pub fn conflict<I: Into<String>>(self, msg: I) -> Error {
        self.error(StatusCode::CONFLICT, msg)
    }

    pub fn internal_server_error<I: Into<String>>(self, msg: I) -> Error {
        let msg = msg.into();
        let msg = if msg.trim().is_empty() {
            String::from("An error occurred")
        } else {
            msg
        };
        self.error(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl<T> JsonResponse<T>
where
    T: serde::Serialize,
{
    pub fn build() -> JsonResponseBuilder<T> {
        JsonResponseBuilder {
            message: String::new(),
            id: None,
            item: None,
            list: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[test]
    fn failure_carries_only_message() {
        let json = JsonResponse::<String>::build().set_msg("nope").to_string();
        assert_eq!(json, r#"{"message":"nope"}"#);
    }

    #[test]
    fn ok_keeps_item_and_id() {
        let response = JsonResponse::build().set_id(7).set_item(3).ok("Saved");
        assert_eq!(response.message, "Saved");
        assert_eq!(response.id.as_deref(), Some("7"));
        assert_eq!(response.item, Some(3));
        assert!(response.list.is_none());
    }

    #[actix_web::test]
    async fn errors_render_status_and_json_body() {
        let err = JsonResponse::<String>::build().form_error("name is required");
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "name is required");
    }

    #[actix_web::test]
    async fn empty_internal_message_gets_generic_text() {
        let err = JsonResponse::<String>::build().internal_server_error("");
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["message"], "An error occurred");
    }
}
