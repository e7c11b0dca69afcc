//! Polish business registry lookups.
//!
//! Verifies organizations against the Ministry of Finance VAT payer
//! whitelist and the National Court Register (KRS).
//!
//! # Example
//!
//! ```ignore
//! use shelterwish::registry::*;
//!
//! let client = RegistryClient::new(RegistryConfig::from_env()?)?;
//!
//! // Malformed NIPs are rejected locally, without a request
//! assert!(client.lookup_nip_today("1234567890").await.is_err());
//!
//! let subject = client.lookup_nip_today("526-000-12-46").await?;
//! println!("{} ({:?})", subject.name, subject.vat_status);
//!
//! let foundation = client.lookup_krs("123456").await?;
//! println!("{} in {:?}", foundation.name, foundation.city);
//! ```

mod client;
mod config;
mod krs;
mod whitelist;

use thiserror::Error;

use crate::core::NipError;

pub use client::RegistryClient;
pub use config::{DEFAULT_KRS_URL, DEFAULT_WHITELIST_URL, RegistryConfig};
pub use krs::{KrsEntity, KrsRegister, normalize_krs, parse_krs_response};
pub use whitelist::{VatStatus, WhitelistSubject, parse_whitelist_response};

/// Error from a registry lookup.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The NIP failed local validation; no request was sent.
    #[error("invalid NIP: {0}")]
    InvalidNip(#[from] NipError),

    /// The KRS number is not 1-10 digits.
    #[error("invalid KRS number '{0}'")]
    InvalidKrs(String),

    /// Bad configuration value.
    #[error("registry configuration error: {0}")]
    Config(String),

    /// Network or HTTP transport error.
    #[error("registry network error: {0}")]
    Network(String),

    /// The registry answered with an error.
    #[error("registry API error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The registry has no entry for the identifier.
    #[error("not found in registry: {0}")]
    NotFound(String),

    /// Failed to parse the response.
    #[error("registry parse error: {0}")]
    Parse(String),
}
