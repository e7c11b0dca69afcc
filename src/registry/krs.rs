//! KRS (Krajowy Rejestr Sądowy) extract handling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RegistryError;

/// KRS register section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KrsRegister {
    /// Associations, foundations and other non-profits ("rejestr S").
    Associations,
    /// Businesses ("rejestr P").
    Businesses,
}

impl KrsRegister {
    pub(crate) fn query_code(self) -> &'static str {
        match self {
            Self::Associations => "S",
            Self::Businesses => "P",
        }
    }
}

/// Current-extract data for an entity registered in KRS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KrsEntity {
    /// Ten-digit KRS number.
    pub krs: String,
    pub register: KrsRegister,
    pub name: String,
    /// E.g. "FUNDACJA", "STOWARZYSZENIE".
    pub legal_form: Option<String>,
    /// NIP as printed in the extract, not verified.
    pub nip: Option<String>,
    pub regon: Option<String>,
    pub street: Option<String>,
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub registration_date: Option<NaiveDate>,
}

/// Zero-pad a KRS number to ten digits.
pub fn normalize_krs(krs: &str) -> Result<String, RegistryError> {
    let trimmed = krs.trim();
    if trimmed.is_empty() || trimmed.len() > 10 || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return Err(RegistryError::InvalidKrs(krs.to_string()));
    }
    Ok(format!("{trimmed:0>10}"))
}

fn text(root: &Value, pointer: &str) -> Option<String> {
    root.pointer(pointer)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a `OdpisAktualny` JSON response.
pub fn parse_krs_response(body: &str, register: KrsRegister) -> Result<KrsEntity, RegistryError> {
    let root: Value = serde_json::from_str(body).map_err(|e| RegistryError::Parse(e.to_string()))?;

    let krs = text(&root, "/odpis/naglowekA/numerKRS")
        .ok_or_else(|| RegistryError::Parse("missing odpis.naglowekA.numerKRS".into()))?;
    let name = text(&root, "/odpis/dane/dzial1/danePodmiotu/nazwa")
        .ok_or_else(|| RegistryError::Parse("missing entity name".into()))?;

    let street = match (
        text(&root, "/odpis/dane/dzial1/siedzibaIAdres/adres/ulica"),
        text(&root, "/odpis/dane/dzial1/siedzibaIAdres/adres/nrDomu"),
    ) {
        (Some(street), Some(no)) => Some(format!("{street} {no}")),
        (street, _) => street,
    };

    Ok(KrsEntity {
        krs,
        register,
        name,
        legal_form: text(&root, "/odpis/dane/dzial1/danePodmiotu/formaPrawna"),
        nip: text(&root, "/odpis/dane/dzial1/danePodmiotu/identyfikatory/nip"),
        regon: text(&root, "/odpis/dane/dzial1/danePodmiotu/identyfikatory/regon"),
        street,
        postal_code: text(&root, "/odpis/dane/dzial1/siedzibaIAdres/adres/kodPocztowy"),
        city: text(&root, "/odpis/dane/dzial1/siedzibaIAdres/adres/miejscowosc")
            .or_else(|| text(&root, "/odpis/dane/dzial1/siedzibaIAdres/siedziba/miejscowosc")),
        registration_date: text(&root, "/odpis/naglowekA/dataRejestracjiWKRS")
            .and_then(|d| NaiveDate::parse_from_str(&d, "%d.%m.%Y").ok()),
    })
}
