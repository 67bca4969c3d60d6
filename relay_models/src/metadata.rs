use serde::{Deserialize, Serialize};

/// Placeholder for metadata values that could not be determined.
pub const UNKNOWN: &str = "unknown";

/// Information about the connection a submission was received on.
///
/// Only used to enrich the outgoing email, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionMetadata {
    pub client_ip: String,
    pub user_agent: String,
    pub country: String,
    pub city: String,
    pub region: String,
    pub timezone: String,
    pub asn: String,
    pub colo: String,
}

impl Default for ConnectionMetadata {
    fn default() -> Self {
        Self {
            client_ip: UNKNOWN.into(),
            user_agent: UNKNOWN.into(),
            country: UNKNOWN.into(),
            city: UNKNOWN.into(),
            region: UNKNOWN.into(),
            timezone: UNKNOWN.into(),
            asn: UNKNOWN.into(),
            colo: UNKNOWN.into(),
        }
    }
}

impl ConnectionMetadata {
    /// Returns the metadata as `(label, value)` pairs in display order.
    pub fn entries(&self) -> [(&'static str, &str); 8] {
        [
            ("IP Address", self.client_ip.as_str()),
            ("User Agent", self.user_agent.as_str()),
            ("Country", self.country.as_str()),
            ("City", self.city.as_str()),
            ("Region", self.region.as_str()),
            ("Timezone", self.timezone.as_str()),
            ("ASN", self.asn.as_str()),
            ("Data Center", self.colo.as_str()),
        ]
    }
}
