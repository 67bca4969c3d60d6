use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{http::HeaderName, Router};
use relay_core_contact_contracts::ContactFeatureService;
use relay_di::Build;
use tokio::net::TcpListener;
use tracing::info;

pub use crate::origin::AllowedOrigins;

mod extractors;
mod middlewares;
mod models;
mod origin;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Contact> {
    config: RestServerConfig,
    contact: Contact,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: SocketAddr,
    pub allowed_origins: Arc<AllowedOrigins>,
    pub edge_headers: Arc<RestServerEdgeHeaders>,
}

/// Request headers the edge network uses to pass connection information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestServerEdgeHeaders {
    pub country: HeaderName,
    pub city: HeaderName,
    pub region: HeaderName,
    pub timezone: HeaderName,
    pub asn: HeaderName,
    pub colo: HeaderName,
}

impl RestServerEdgeHeaders {
    pub fn new(
        country: &str,
        city: &str,
        region: &str,
        timezone: &str,
        asn: &str,
        colo: &str,
    ) -> anyhow::Result<Self> {
        let parse = |name: &str| {
            name.parse::<HeaderName>()
                .with_context(|| format!("Invalid edge header name {name:?}"))
        };

        Ok(Self {
            country: parse(country)?,
            city: parse(city)?,
            region: parse(region)?,
            timezone: parse(timezone)?,
            asn: parse(asn)?,
            colo: parse(colo)?,
        })
    }
}

impl Default for RestServerEdgeHeaders {
    fn default() -> Self {
        Self {
            country: HeaderName::from_static("cf-ipcountry"),
            city: HeaderName::from_static("cf-ipcity"),
            region: HeaderName::from_static("cf-region"),
            timezone: HeaderName::from_static("cf-timezone"),
            asn: HeaderName::from_static("cf-asn"),
            colo: HeaderName::from_static("cf-colo"),
        }
    }
}

impl<Contact> RestServer<Contact>
where
    Contact: ContactFeatureService,
{
    pub fn new(config: RestServerConfig, contact: Contact) -> Self {
        Self { config, contact }
    }

    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.addr;
        let router = self.router();

        info!("Starting http server on {addr}");
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {addr}"))?;
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .context("Failed to start HTTP server")
    }

    pub fn router(self) -> Router<()> {
        let RestServerConfig {
            allowed_origins,
            edge_headers,
            ..
        } = self.config;

        let router = Router::new()
            .merge(routes::health::router())
            .merge(routes::contact::router(
                Arc::new(self.contact),
                Arc::clone(&allowed_origins),
            ));

        let router = middlewares::panic_handler::add(router);
        let router = middlewares::trace::add(router);
        let router = middlewares::connection_metadata::add(router, edge_headers);
        let router = middlewares::request_id::add(router);
        middlewares::cors::add(router, &allowed_origins)
    }
}
