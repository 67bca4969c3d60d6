use std::sync::Arc;

use anyhow::Context;
use relay_di::Build;
use relay_email_contracts::{ContentType, Email, EmailService};
use relay_models::{email_address::EmailAddressWithName, Sensitive};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::http::HttpClient;

pub mod http;

/// Default endpoint of the transactional email api.
pub const SEND_ENDPOINT: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone, Build)]
pub struct EmailServiceImpl {
    config: EmailServiceConfig,
    #[state]
    http: HttpClient,
}

#[derive(Debug, Clone)]
pub struct EmailServiceConfig {
    endpoint: Arc<Url>,
    api_key: Arc<Sensitive<String>>,
    from: Arc<EmailAddressWithName>,
}

impl EmailServiceConfig {
    pub fn new(
        endpoint_override: Option<Url>,
        api_key: String,
        from: EmailAddressWithName,
    ) -> anyhow::Result<Self> {
        let endpoint = match endpoint_override {
            Some(endpoint) => endpoint,
            None => SEND_ENDPOINT
                .parse()
                .context("Failed to parse default email api endpoint")?,
        };

        Ok(Self {
            endpoint: endpoint.into(),
            api_key: Arc::new(api_key.into()),
            from: from.into(),
        })
    }
}

impl EmailServiceImpl {
    pub fn new(config: EmailServiceConfig) -> Self {
        Self {
            config,
            http: Default::default(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.config.endpoint
    }
}

impl EmailService for EmailServiceImpl {
    async fn send(&self, email: Email) -> anyhow::Result<bool> {
        let (html, text) = match email.content_type {
            ContentType::Html => (Some(email.body.as_str()), None),
            ContentType::Text => (None, Some(email.body.as_str())),
        };

        let request = SendEmailRequest {
            from: self.config.from.to_string(),
            to: email.recipient.to_string(),
            subject: &email.subject,
            html,
            text,
            reply_to: email.reply_to.as_deref(),
        };

        let response = self
            .http
            .post((*self.config.endpoint).clone())
            .bearer_auth(self.config.api_key.as_str())
            .json(&request)
            .send()
            .await
            .context("Failed to send email api request")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, %body, "email api rejected the email");
            return Ok(false);
        }

        if let Ok(SendEmailResponse { id }) = response.json().await {
            debug!(%id, "email accepted by email api");
        }

        Ok(true)
    }
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: String,
    to: String,
    subject: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    html: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
}

#[derive(Deserialize)]
struct SendEmailResponse {
    id: String,
}
