use axum::{
    async_trait,
    extract::{
        rejection::{FormRejection, JsonRejection},
        FromRequest, Request,
    },
    http::header::CONTENT_TYPE,
    response::{IntoResponse, Response},
    Form, Json,
};
use thiserror::Error;

use crate::{models::contact::ApiContactSubmission, routes::internal_server_error};

/// Contact form submission, read from a json or an url encoded body depending
/// on the `Content-Type` header.
pub struct ApiContactForm(pub ApiContactSubmission);

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for ApiContactForm {
    type Rejection = ApiContactFormRejection;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|x| x.to_str().ok())
            .is_some_and(|x| x.contains("application/json"));

        if is_json {
            let Json(submission) = Json::<ApiContactSubmission>::from_request(request, state).await?;
            Ok(Self(submission))
        } else {
            let Form(submission) = Form::<ApiContactSubmission>::from_request(request, state).await?;
            Ok(Self(submission))
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiContactFormRejection {
    #[error("Failed to read json body: {0}")]
    Json(#[from] JsonRejection),
    #[error("Failed to read form body: {0}")]
    Form(#[from] FormRejection),
}

impl IntoResponse for ApiContactFormRejection {
    fn into_response(self) -> Response {
        internal_server_error(self)
    }
}
