use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::ORIGIN, StatusCode},
    middleware::{from_fn_with_state, Next},
    response::{IntoResponse, Response},
    Router,
};
use tracing::debug;

use crate::AllowedOrigins;

/// Rejects requests carrying an `Origin` header that is not allowed.
/// Requests without an `Origin` header are let through.
pub fn add<S: Clone + Send + Sync + 'static>(
    router: Router<S>,
    allowed_origins: Arc<AllowedOrigins>,
) -> Router<S> {
    router.route_layer(from_fn_with_state(allowed_origins, middleware))
}

async fn middleware(
    State(allowed_origins): State<Arc<AllowedOrigins>>,
    request: Request,
    next: Next,
) -> Response {
    if let Some(origin) = request.headers().get(ORIGIN) {
        if !allowed_origins.contains(origin) {
            debug!(?origin, "rejecting request from disallowed origin");
            return StatusCode::FORBIDDEN.into_response();
        }
    }

    next.run(request).await
}
