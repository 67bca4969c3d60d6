use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Extension, Json, Router,
};
use relay_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use relay_models::{contact::ContactSubmission, metadata::ConnectionMetadata};

use super::internal_server_error;
use crate::{
    extractors::contact_form::ApiContactForm, middlewares::origin_guard,
    models::contact::ApiContactResponse, AllowedOrigins,
};

pub fn router(
    service: Arc<impl ContactFeatureService>,
    allowed_origins: Arc<AllowedOrigins>,
) -> Router<()> {
    let router = Router::new()
        .route("/", routing::post(send_message))
        .route("/contact", routing::post(send_message))
        .with_state(service);

    origin_guard::add(router, allowed_origins)
}

async fn send_message(
    service: State<Arc<impl ContactFeatureService>>,
    metadata: Option<Extension<ConnectionMetadata>>,
    ApiContactForm(submission): ApiContactForm,
) -> Response {
    let submission = match ContactSubmission::parse(submission.into()) {
        Ok(submission) => submission,
        Err(err) => return (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    };
    let metadata = metadata.map(|Extension(x)| x).unwrap_or_default();

    match service.send_message(submission, metadata).await {
        Ok(()) => Json(ApiContactResponse::SUCCESS).into_response(),
        Err(err @ ContactSendMessageError::Send) => internal_server_error(err),
        Err(ContactSendMessageError::Other(err)) => internal_server_error(err),
    }
}
