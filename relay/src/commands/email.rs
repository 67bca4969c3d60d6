use anyhow::ensure;
use clap::Subcommand;
use relay_config::Config;
use relay_email_contracts::{ContentType, Email, EmailService};
use relay_email_impl::EmailServiceImpl;
use relay_models::email_address::EmailAddressWithName;
use tracing::info;

use crate::environment::email_service_config;

#[derive(Debug, Subcommand)]
pub enum EmailCommand {
    /// Test email deliverability
    Test { recipient: EmailAddressWithName },
}

impl EmailCommand {
    pub async fn invoke(self, config: Config) -> anyhow::Result<()> {
        match self {
            EmailCommand::Test { recipient } => test(config, recipient).await,
        }
    }
}

async fn test(config: Config, recipient: EmailAddressWithName) -> anyhow::Result<()> {
    let email_service = EmailServiceImpl::new(email_service_config(&config)?);
    info!(endpoint = %email_service.endpoint(), %recipient, "Sending test email");

    let ok = email_service
        .send(Email {
            recipient,
            subject: "Email Deliverability Test".into(),
            body: "Email deliverability seems to be working!".into(),
            content_type: ContentType::Text,
            reply_to: None,
        })
        .await?;

    ensure!(ok, "The email provider refused to send the test email");

    Ok(())
}
