//! REST router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. Cache-Control → 2. Audit logger → 3. Error description

use std::sync::Arc;

use axum::http::{header, HeaderValue, Uri};
use axum::routing::get;
use axum::Router;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::error::ApiError;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the API router over shared application state.
pub fn api_router(core: Arc<CoreState>) -> Router {
    build_router(ApiContext::new(core))
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route(
            "/doctors",
            get(endpoints::doctors::list).post(endpoints::doctors::create),
        )
        .route(
            "/doctors/:id",
            get(endpoints::doctors::detail)
                .put(endpoints::doctors::update)
                .delete(endpoints::doctors::remove),
        )
        .route(
            "/doctors/specialty/:specialty",
            get(endpoints::doctors::by_specialty),
        )
        .route(
            "/doctors/:id/appointments",
            get(endpoints::doctors::appointments),
        )
        .route(
            "/patients",
            get(endpoints::patients::list).post(endpoints::patients::create),
        )
        .route(
            "/patients/:id",
            get(endpoints::patients::detail)
                .put(endpoints::patients::update)
                .delete(endpoints::patients::remove),
        )
        .route(
            "/patients/:id/appointments",
            get(endpoints::patients::appointments),
        )
        .route(
            "/appointments",
            get(endpoints::appointments::list)
                .post(endpoints::appointments::create)
                .put(endpoints::appointments::update)
                .delete(endpoints::appointments::remove),
        )
        .route("/appointments/one", get(endpoints::appointments::one))
        .with_state(ctx);

    // Layers are applied from bottom (innermost) to top (outermost).
    Router::new()
        .nest("/api", api)
        .fallback(unknown_route)
        .layer(axum::middleware::from_fn(
            middleware::describe::attach_request_description,
        ))
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
}

async fn unknown_route(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("No route for {}", uri.path()))
}
