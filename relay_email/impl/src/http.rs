use std::ops::Deref;

use relay_utils::relay_version;

const _: () = {
    assert!(!env!("CARGO_PKG_HOMEPAGE").is_empty());
    assert!(!env!("CARGO_PKG_REPOSITORY").is_empty());
};

/// `User-Agent` sent with every request to the email api.
pub fn user_agent() -> String {
    format!(
        "Contact Relay ({}, {}, Version {})",
        env!("CARGO_PKG_HOMEPAGE"),
        env!("CARGO_PKG_REPOSITORY"),
        relay_version()
    )
}

#[derive(Debug, Clone)]
pub struct HttpClient(reqwest::Client);

impl Deref for HttpClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        let client = reqwest::Client::builder()
            .user_agent(user_agent())
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!("Falling back to default http client: {err}");
                reqwest::Client::new()
            });
        Self(client)
    }
}
