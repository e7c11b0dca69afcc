//! Registry client configuration.

use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::RegistryError;

/// Ministry of Finance VAT payer whitelist ("Biała lista").
pub const DEFAULT_WHITELIST_URL: &str = "https://wl-api.mf.gov.pl";

/// Ministry of Justice KRS open API.
pub const DEFAULT_KRS_URL: &str = "https://api-krs.ms.gov.pl";

const ENV_WHITELIST_URL: &str = "SHELTERWISH_WHITELIST_URL";
const ENV_KRS_URL: &str = "SHELTERWISH_KRS_URL";
const ENV_TIMEOUT: &str = "SHELTERWISH_REGISTRY_TIMEOUT";

/// Endpoints and HTTP settings for [`RegistryClient`](super::RegistryClient).
///
/// Missing fields fall back to the public government endpoints, so an empty
/// TOML/JSON table deserializes to [`RegistryConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    pub whitelist_url: String,
    pub krs_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            whitelist_url: DEFAULT_WHITELIST_URL.into(),
            krs_url: DEFAULT_KRS_URL.into(),
            timeout_secs: 30,
            user_agent: concat!("shelterwish/", env!("CARGO_PKG_VERSION")).into(),
        }
    }
}

impl RegistryConfig {
    /// Defaults overridden by `SHELTERWISH_*` environment variables.
    pub fn from_env() -> Result<Self, RegistryError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, RegistryError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_WHITELIST_URL) {
            config.whitelist_url = url;
        }
        if let Some(url) = lookup(ENV_KRS_URL) {
            config.krs_url = url;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT) {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                RegistryError::Config(format!("{ENV_TIMEOUT} must be a number of seconds, got '{raw}'"))
            })?;
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub(crate) fn whitelist_base(&self) -> &str {
        self.whitelist_url.trim_end_matches('/')
    }

    pub(crate) fn krs_base(&self) -> &str {
        self.krs_url.trim_end_matches('/')
    }
}
