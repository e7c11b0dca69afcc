//! HTTP client for the Polish business registries.

use chrono::{NaiveDate, Utc};
use reqwest::StatusCode;
use tracing::{debug, warn};

use super::RegistryError;
use super::config::RegistryConfig;
use super::krs::{KrsEntity, KrsRegister, normalize_krs, parse_krs_response};
use super::whitelist::{WhitelistSubject, error_message, parse_whitelist_response};
use crate::core::Nip;

/// Looks up organizations in the VAT whitelist and in KRS.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct RegistryClient {
    http: reqwest::Client,
    config: RegistryConfig,
}

impl RegistryClient {
    pub fn new(config: RegistryConfig) -> Result<Self, RegistryError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RegistryError::Network(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Look up a NIP in the VAT whitelist as of `date`.
    ///
    /// The NIP is validated locally first; a malformed number never reaches
    /// the network.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError::InvalidNip` for a bad checksum,
    /// `RegistryError::NotFound` when the ministry has no such subject,
    /// `RegistryError::Api` for non-success responses,
    /// `RegistryError::Network` on connection issues.
    pub async fn lookup_nip(
        &self,
        nip: &str,
        date: NaiveDate,
    ) -> Result<WhitelistSubject, RegistryError> {
        let nip = Nip::parse(nip)?;
        let url = format!(
            "{}/api/search/nip/{}",
            self.config.whitelist_base(),
            nip.as_str()
        );
        debug!(nip = %nip, %date, "querying VAT whitelist");

        let resp = self
            .http
            .get(&url)
            .query(&[("date", date.format("%Y-%m-%d").to_string())])
            .send()
            .await
            .map_err(|e| RegistryError::Network(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| RegistryError::Network(e.to_string()))?;

        if !status.is_success() {
            let message = error_message(&body).unwrap_or(body);
            warn!(nip = %nip, status = status.as_u16(), %message, "VAT whitelist request failed");
            return Err(RegistryError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_whitelist_response(&body, &nip)
    }

    /// Look up a NIP in the VAT whitelist as of today (UTC).
    pub async fn lookup_nip_today(&self, nip: &str) -> Result<WhitelistSubject, RegistryError> {
        self.lookup_nip(nip, Utc::now().date_naive()).await
    }

    /// Fetch the current KRS extract.
    ///
    /// Non-profits are registered in register S, so that is tried first;
    /// register P is tried when S has no such entity.
    pub async fn lookup_krs(&self, krs: &str) -> Result<KrsEntity, RegistryError> {
        let krs = normalize_krs(krs)?;
        for register in [KrsRegister::Associations, KrsRegister::Businesses] {
            match self.fetch_krs(&krs, register).await {
                Err(RegistryError::NotFound(_)) => {
                    debug!(%krs, register = register.query_code(), "not found in KRS register");
                }
                other => return other,
            }
        }
        Err(RegistryError::NotFound(krs))
    }

    async fn fetch_krs(&self, krs: &str, register: KrsRegister) -> Result<KrsEntity, RegistryError> {
        let url = format!(
            "{}/api/krs/OdpisAktualny/{krs}",
            self.config.krs_base()
        );
        let resp = self
            .http
            .get(&url)
            .query(&[("rejestr", register.query_code()), ("format", "json")])
            .send()
            .await
            .map_err(|e| RegistryError::Network(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND || status == StatusCode::NO_CONTENT {
            return Err(RegistryError::NotFound(krs.to_string()));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| RegistryError::Network(e.to_string()))?;
        if !status.is_success() {
            warn!(%krs, status = status.as_u16(), "KRS request failed");
            return Err(RegistryError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        parse_krs_response(&body, register)
    }
}
