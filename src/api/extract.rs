//! Request extractors whose rejections go through `AppError`

use axum::{
    extract::{FromRequest, FromRequestParts},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::error::AppError;

/// JSON body; malformed or incomplete bodies are answered with 400 `{error}`
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query string parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// Path parameters
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::visitor::{CheckInVisitor, VisitorQuery};
    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        routing::{get, post},
        Router,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route(
                "/visitors",
                get(|Query(query): Query<VisitorQuery>| async move {
                    Json(query.status.map(|s| s.to_string()))
                }),
            )
            .route("/visitors/:id", get(|Path(id): Path<i32>| async move { Json(id) }))
            .route(
                "/visitors/checkin",
                post(|Json(data): Json<CheckInVisitor>| async move { Json(data.name) }),
            )
    }

    async fn send(request: Request<Body>) -> (StatusCode, Option<String>, Value) {
        let response = app().oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn assert_json_bad_request((status, content_type, body): (StatusCode, Option<String>, Value)) {
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(content_type.as_deref(), Some("application/json"));
        assert!(body["error"].is_string(), "body: {body}");
    }

    #[tokio::test]
    async fn missing_body_field_is_json_400() {
        let request = Request::builder()
            .method("POST")
            .uri("/visitors/checkin")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"purpose":"Meeting","host_name":"Jane"}"#))
            .unwrap();

        let response = send(request).await;
        assert!(response.2["error"].as_str().unwrap().contains("name"));
        assert_json_bad_request(response);
    }

    #[tokio::test]
    async fn bad_query_and_path_values_are_json_400() {
        assert_json_bad_request(send(get_request("/visitors?status=gone")).await);
        assert_json_bad_request(send(get_request("/visitors/abc")).await);
    }

    #[tokio::test]
    async fn valid_requests_pass_through() {
        let (status, _, body) = send(get_request("/visitors?status=checked_out")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "checked_out");

        let (status, _, body) = send(get_request("/visitors/42")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, 42);
    }
}
