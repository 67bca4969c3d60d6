use std::sync::Arc;

use anyhow::Context;
use relay_api_rest::{AllowedOrigins, RestServerConfig, RestServerEdgeHeaders};
use relay_config::Config;
use relay_core_contact_impl::ContactFeatureConfig;
use relay_di::provider;
use relay_email_impl::EmailServiceConfig;

pub mod types;

provider! {
    /// The default provider, capable of providing all the dependencies
    pub Provider {
        ..config: ConfigProvider {
            // API
            RestServerConfig,

            // Email
            EmailServiceConfig,

            // Core
            ContactFeatureConfig,
        }
    }
}

impl Provider {
    pub fn new(config: ConfigProvider) -> Self {
        Self {
            _cache: Default::default(),
            config,
        }
    }
}

provider! {
    /// Reduced provider, capable of providing services that only depend on the configuration
    pub ConfigProvider {
        // API
        rest_server_config: RestServerConfig,

        // Email
        email_service_config: EmailServiceConfig,

        // Core
        contact_feature_config: ContactFeatureConfig,
    }
}

impl ConfigProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // API
        let edge_headers = &config.http.edge_headers;
        let rest_server_config = RestServerConfig {
            addr: config.http.address,
            allowed_origins: Arc::new(
                config
                    .contact
                    .allowed_origins
                    .parse::<AllowedOrigins>()
                    .unwrap_or_default(),
            ),
            edge_headers: RestServerEdgeHeaders::new(
                &edge_headers.country,
                &edge_headers.city,
                &edge_headers.region,
                &edge_headers.timezone,
                &edge_headers.asn,
                &edge_headers.colo,
            )
            .context("Invalid http.edge_headers config")?
            .into(),
        };

        // Email
        let email_service_config = email_service_config(config)?;

        // Core
        let contact_feature_config = ContactFeatureConfig {
            recipient: config.contact.recipient.clone().into(),
        };

        Ok(Self {
            _cache: Default::default(),
            rest_server_config,
            email_service_config,
            contact_feature_config,
        })
    }
}

pub fn email_service_config(config: &Config) -> anyhow::Result<EmailServiceConfig> {
    EmailServiceConfig::new(
        config.email.endpoint_override.clone(),
        config.email.api_key.0.clone(),
        config.email.from.clone(),
    )
    .context("Invalid email config")
}
