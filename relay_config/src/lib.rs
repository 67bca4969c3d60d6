use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::Context;
use config::{ConfigBuilder, Environment, File, FileFormat};
use relay_models::{email_address::EmailAddressWithName, Sensitive};
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Environment variable containing a list of config files to load instead of
/// the default one.
pub const CONFIG_PATHS_ENV: &str = "RELAY_CONFIG";

/// Prefix of environment variables overriding single config values.
pub const ENV_PREFIX: &str = "RELAY";

type Builder = ConfigBuilder<config::builder::DefaultState>;

/// Loads the config files from `RELAY_CONFIG` (or the default config file)
/// and applies `RELAY__*` environment overrides.
pub fn load() -> anyhow::Result<Config> {
    let paths: Vec<PathBuf> = match std::env::var_os(CONFIG_PATHS_ENV) {
        Some(paths) => std::env::split_paths(&paths).collect(),
        None => vec![PathBuf::from(DEFAULT_CONFIG_PATH)],
    };

    files(paths.as_slice())?
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

/// Loads the given config files and applies each override as an additional
/// toml snippet. Environment variables are ignored.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    overrides
        .iter()
        .fold(files(paths)?, |builder, content| {
            builder.add_source(File::from_str(content, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

fn files(paths: &[impl AsRef<Path>]) -> anyhow::Result<Builder> {
    paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub http: HttpConfig,
    pub email: EmailConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub address: SocketAddr,
    pub edge_headers: EdgeHeadersConfig,
}

/// Names of the headers carrying edge provided connection information.
#[derive(Debug, Clone, Deserialize)]
pub struct EdgeHeadersConfig {
    pub country: String,
    pub city: String,
    pub region: String,
    pub timezone: String,
    pub asn: String,
    pub colo: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    pub api_key: Sensitive<String>,
    pub from: EmailAddressWithName,
    pub endpoint_override: Option<Url>,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub recipient: EmailAddressWithName,
    pub allowed_origins: String,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn load_default_config() {
        let config = load_with_override(&[Path::new(DEFAULT_CONFIG_PATH)], &[]).unwrap();

        assert_eq!(config.http.address.port(), 8000);
        assert_eq!(config.http.edge_headers.country, "CF-IPCountry");
        assert_eq!(config.email.endpoint_override, None);
        assert_eq!(
            config.contact.recipient.to_string(),
            "contact@example.com"
        );
    }

    #[test]
    fn override_values() {
        let config = load_with_override(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &[
                r#"email.api_key = "re_123""#,
                r#"email.endpoint_override = "http://127.0.0.1:8001/emails""#,
                r#"contact.allowed_origins = "https://site.example""#,
            ],
        )
        .unwrap();

        assert_eq!(config.email.api_key.as_str(), "re_123");
        assert_eq!(
            config.email.endpoint_override.unwrap().as_str(),
            "http://127.0.0.1:8001/emails"
        );
        assert_eq!(config.contact.allowed_origins, "https://site.example");
    }

    #[test]
    fn api_key_is_not_printed() {
        let config = load_with_override(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &[r#"email.api_key = "re_super_secret""#],
        )
        .unwrap();

        assert!(!format!("{config:?}").contains("re_super_secret"));
    }

    #[test]
    fn invalid_recipient() {
        let result = load_with_override(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &[r#"contact.recipient = "not an address""#],
        );
        assert!(result.is_err());
    }

    #[test]
    fn missing_file() {
        assert!(load_with_override(&[Path::new("/does/not/exist.toml")], &[]).is_err());
    }
}
