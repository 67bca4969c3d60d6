use std::future::Future;

use relay_models::{contact::ContactSubmission, metadata::ConnectionMetadata};
use thiserror::Error;

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Forward a validated contact form submission to the configured recipient.
    fn send_message(
        &self,
        submission: ContactSubmission,
        metadata: ConnectionMetadata,
    ) -> impl Future<Output = Result<(), ContactSendMessageError>> + Send;
}

#[derive(Debug, Error)]
pub enum ContactSendMessageError {
    #[error("Failed to send message.")]
    Send,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg(feature = "mock")]
impl MockContactFeatureService {
    pub fn with_send_message(
        mut self,
        submission: ContactSubmission,
        metadata: ConnectionMetadata,
        result: Result<(), ContactSendMessageError>,
    ) -> Self {
        self.expect_send_message()
            .once()
            .with(
                mockall::predicate::eq(submission),
                mockall::predicate::eq(metadata),
            )
            .return_once(move |_, _| Box::pin(std::future::ready(result)));
        self
    }
}
