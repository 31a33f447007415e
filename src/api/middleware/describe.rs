//! Fills the `description` field of error bodies with the request URI.

use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::error::ErrorBody;

pub async fn attach_request_description(
    req: Request<axum::body::Body>,
    next: Next,
) -> Response {
    let description = format!("uri={}", req.uri().path());

    let mut response = next.run(req).await;

    let report = response.extensions_mut().remove::<ErrorBody>();
    match report {
        Some(mut body) => {
            body.description = description;
            (response.status(), Json(body)).into_response()
        }
        None => response,
    }
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;
    use tower::ServiceExt;

    use super::*;
    use crate::api::error::ApiError;

    async fn missing() -> Result<&'static str, ApiError> {
        Err(ApiError::NotFound("Doctor not found with id: 3".into()))
    }

    async fn fine() -> &'static str {
        "ok"
    }

    fn app() -> Router {
        Router::new()
            .route("/missing", get(missing))
            .route("/fine", get(fine))
            .layer(axum::middleware::from_fn(attach_request_description))
    }

    #[tokio::test]
    async fn error_body_gets_request_uri() {
        let req = Request::builder().uri("/missing").body(Body::empty()).unwrap();
        let response = app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["description"], "uri=/missing");
        assert_eq!(json["message"], "Doctor not found with id: 3");
    }

    #[tokio::test]
    async fn success_passes_through() {
        let req = Request::builder().uri("/fine").body(Body::empty()).unwrap();
        let response = app().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), 64).await.unwrap();
        assert_eq!(&body[..], b"ok");
    }
}
