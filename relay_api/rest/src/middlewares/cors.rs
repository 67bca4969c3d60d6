use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::AllowedOrigins;

/// Answers preflight requests and adds cors headers for allowed origins.
///
/// Rejecting requests from other origins is the job of the origin guard.
pub fn add<S: Clone + Send + Sync + 'static>(
    router: Router<S>,
    allowed_origins: &AllowedOrigins,
) -> Router<S> {
    let origins = allowed_origins
        .iter()
        .filter(|x| *x != "*")
        .filter_map(|x| HeaderValue::from_str(x).ok())
        .collect::<Vec<_>>();

    router.layer(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE]),
    )
}
