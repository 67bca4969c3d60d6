use std::sync::Arc;

use relay_core_contact_contracts::{ContactFeatureService, ContactSendMessageError};
use relay_di::Build;
use relay_email_contracts::{ContentType, Email, EmailService};
use relay_models::{
    contact::ContactSubmission,
    email_address::EmailAddressWithName,
    metadata::ConnectionMetadata,
};
use relay_shared_contracts::time::TimeService;
use tracing::info;

mod body;

#[derive(Debug, Clone, Build)]
pub struct ContactFeatureServiceImpl<Time, Email> {
    time: Time,
    email: Email,
    config: ContactFeatureConfig,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    pub recipient: Arc<EmailAddressWithName>,
}

impl<Time, EmailS> ContactFeatureService for ContactFeatureServiceImpl<Time, EmailS>
where
    Time: TimeService,
    EmailS: EmailService,
{
    async fn send_message(
        &self,
        submission: ContactSubmission,
        metadata: ConnectionMetadata,
    ) -> Result<(), ContactSendMessageError> {
        let email = Email {
            recipient: (*self.config.recipient).clone(),
            subject: format!("New Contact Form Submission from {}", *submission.name),
            body: body::render(&submission, &metadata, self.time.now()),
            content_type: ContentType::Html,
            reply_to: Some((*submission.email).clone()),
        };

        if !self.email.send(email).await? {
            return Err(ContactSendMessageError::Send);
        }

        info!(client_ip = %metadata.client_ip, "forwarded contact form submission");

        Ok(())
    }
}
