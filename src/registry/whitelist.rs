//! VAT payer whitelist ("Biała lista podatników VAT") response handling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::RegistryError;
use crate::core::Nip;

/// VAT registration status as reported by the whitelist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VatStatus {
    /// "Czynny": active VAT payer.
    Active,
    /// "Zwolniony": exempt from VAT.
    Exempt,
    /// "Niezarejestrowany": not registered.
    NotRegistered,
    /// Any status string this crate does not know.
    Other(String),
}

impl VatStatus {
    fn from_api(raw: &str) -> Self {
        match raw.trim() {
            "Czynny" => Self::Active,
            "Zwolniony" => Self::Exempt,
            "Niezarejestrowany" => Self::NotRegistered,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A subject found in the whitelist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhitelistSubject {
    pub name: String,
    pub nip: Nip,
    pub vat_status: VatStatus,
    pub regon: Option<String>,
    pub krs: Option<String>,
    /// Working address, or residence address for sole traders.
    pub address: Option<String>,
    pub registration_date: Option<NaiveDate>,
    /// Settlement bank accounts (26-digit NRB).
    pub account_numbers: Vec<String>,
    /// Ministry-issued identifier of this query, useful as proof of a check.
    pub request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WlEnvelope {
    result: Option<WlResult>,
    // Error fields
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WlResult {
    subject: Option<WlSubject>,
    request_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WlSubject {
    name: String,
    nip: Option<String>,
    status_vat: Option<String>,
    regon: Option<String>,
    krs: Option<String>,
    working_address: Option<String>,
    residence_address: Option<String>,
    registration_legal_date: Option<String>,
    #[serde(default)]
    account_numbers: Vec<String>,
}

/// Extract the `message` from a whitelist error body, if it has one.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let env: WlEnvelope = serde_json::from_str(body).ok()?;
    match (env.code, env.message) {
        (Some(code), Some(msg)) => Some(format!("{code}: {msg}")),
        (None, Some(msg)) => Some(msg),
        (Some(code), None) => Some(code),
        (None, None) => None,
    }
}

/// Parse a successful whitelist search response.
///
/// `queried` is the NIP that was looked up; it is used when the response
/// omits the subject's own NIP.
pub fn parse_whitelist_response(body: &str, queried: &Nip) -> Result<WhitelistSubject, RegistryError> {
    let env: WlEnvelope =
        serde_json::from_str(body).map_err(|e| RegistryError::Parse(e.to_string()))?;

    if let Some(msg) = env.message.filter(|_| env.result.is_none()) {
        return Err(RegistryError::Api {
            status: 200,
            message: msg,
        });
    }

    let result = env
        .result
        .ok_or_else(|| RegistryError::Parse("missing 'result' object".into()))?;
    let subject = result
        .subject
        .ok_or_else(|| RegistryError::NotFound(queried.to_string()))?;

    let nip = match subject.nip.as_deref() {
        Some(raw) => Nip::parse(raw)
            .map_err(|e| RegistryError::Parse(format!("registry returned invalid NIP: {e}")))?,
        None => queried.clone(),
    };

    Ok(WhitelistSubject {
        name: subject.name,
        nip,
        vat_status: subject
            .status_vat
            .as_deref()
            .map(VatStatus::from_api)
            .unwrap_or(VatStatus::Other(String::new())),
        regon: subject.regon.filter(|r| !r.is_empty()),
        krs: subject.krs.filter(|k| !k.is_empty()),
        address: subject
            .working_address
            .or(subject.residence_address)
            .filter(|a| !a.is_empty()),
        registration_date: subject
            .registration_legal_date
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok()),
        account_numbers: subject.account_numbers,
        request_id: result.request_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nip() -> Nip {
        Nip::parse("5260001246").unwrap()
    }

    #[test]
    fn parses_active_subject() {
        let body = r#"{"result":{"subject":{"name":"FUNDACJA PSI AZYL","nip":"5260001246",
            "statusVat":"Czynny","regon":"012345678","krs":"0000123456","residenceAddress":null,
            "workingAddress":"UL. LEŚNA 4, 00-950 WARSZAWA","registrationLegalDate":"2015-03-01",
            "accountNumbers":["12345678901234567890123456"]},
            "requestDateTime":"15-01-2024 12:00:00","requestId":"abc-123"}}"#;
        let s = parse_whitelist_response(body, &nip()).unwrap();
        assert_eq!(s.name, "FUNDACJA PSI AZYL");
        assert_eq!(s.vat_status, VatStatus::Active);
        assert_eq!(s.krs.as_deref(), Some("0000123456"));
        assert_eq!(s.address.as_deref(), Some("UL. LEŚNA 4, 00-950 WARSZAWA"));
        assert_eq!(s.registration_date, NaiveDate::from_ymd_opt(2015, 3, 1));
        assert_eq!(s.account_numbers.len(), 1);
        assert_eq!(s.request_id.as_deref(), Some("abc-123"));
    }

    #[test]
    fn null_subject_is_not_found() {
        let body = r#"{"result":{"subject":null,"requestId":"x"}}"#;
        let err = parse_whitelist_response(body, &nip()).unwrap_err();
        assert!(matches!(err, RegistryError::NotFound(_)));
    }

    #[test]
    fn error_body_message() {
        let body = r#"{"code":"WL-113","message":"Pole 'NIP' ma nieprawidłową długość."}"#;
        assert_eq!(
            error_message(body).as_deref(),
            Some("WL-113: Pole 'NIP' ma nieprawidłową długość.")
        );
        assert!(error_message("not json").is_none());
    }

    #[test]
    fn unknown_status_kept() {
        assert_eq!(VatStatus::from_api("Czynny "), VatStatus::Active);
        assert_eq!(
            VatStatus::from_api("Wykreślony"),
            VatStatus::Other("Wykreślony".into())
        );
    }
}
