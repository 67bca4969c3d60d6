use relay_config::Config;
use relay_di::Provide;
use tracing::{info, warn};

use crate::environment::{types::RestServer, ConfigProvider, Provider};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    if config.email.api_key.is_empty() {
        warn!("No email api key configured, every submission will be rejected by the provider");
    }
    info!(
        recipient = %config.contact.recipient,
        allowed_origins = %config.contact.allowed_origins,
        "Forwarding contact form submissions"
    );

    let mut provider = Provider::new(ConfigProvider::new(&config)?);
    let server: RestServer = provider.provide();
    server.serve().await
}
