//! NIP (Numer Identyfikacji Podatkowej) validation and formatting.
//!
//! A NIP is ten decimal digits. The last digit is a MOD-11 check digit
//! computed from the first nine with the weights [`NIP_WEIGHTS`]. A
//! remainder of 10 is never issued, so such numbers are invalid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Positional weights applied to the first nine digits.
pub const NIP_WEIGHTS: [u32; 9] = [6, 5, 7, 2, 3, 4, 5, 6, 7];

/// Why a string is not a valid NIP.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum NipError {
    /// Not exactly ten characters after stripping separators.
    #[error("NIP must have 10 digits, got {found}")]
    Length { found: usize },

    /// A non-digit character remained after stripping separators.
    #[error("NIP contains non-digit '{found}' at position {position}")]
    NonDigit { position: usize, found: char },

    /// The weighted sum leaves a remainder of 10.
    #[error("NIP checksum remainder is 10, no such number is issued")]
    RemainderTen,

    /// The check digit does not match.
    #[error("NIP check digit is {found}, expected {expected}")]
    Checksum { expected: u8, found: u8 },
}

/// Strip whitespace and hyphens from a NIP as typed by a user.
pub fn normalize_nip(nip: &str) -> String {
    nip.chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Compute the check digit for the nine leading digits of a NIP.
///
/// Returns `None` when `prefix` is not exactly nine ASCII digits, or when the
/// weighted sum leaves a remainder of 10.
pub fn nip_check_digit(prefix: &str) -> Option<u8> {
    let bytes = prefix.as_bytes();
    if bytes.len() != 9 || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    match weighted_remainder(bytes) {
        10 => None,
        r => Some(r as u8),
    }
}

fn weighted_remainder(digits: &[u8]) -> u32 {
    let sum: u32 = digits
        .iter()
        .zip(NIP_WEIGHTS)
        .map(|(d, w)| u32::from(d - b'0') * w)
        .sum();
    sum % 11
}

fn check(cleaned: &str) -> Result<(), NipError> {
    let len = cleaned.chars().count();
    if len != 10 {
        return Err(NipError::Length { found: len });
    }
    if let Some((position, found)) = cleaned.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
    {
        return Err(NipError::NonDigit { position, found });
    }

    let bytes = cleaned.as_bytes();
    let remainder = weighted_remainder(&bytes[..9]);
    if remainder == 10 {
        return Err(NipError::RemainderTen);
    }
    let found = bytes[9] - b'0';
    if remainder as u8 != found {
        return Err(NipError::Checksum {
            expected: remainder as u8,
            found,
        });
    }
    Ok(())
}

/// Validate a NIP.
///
/// Whitespace and hyphens anywhere in the input are ignored. Returns `false`
/// for anything that is not ten digits with a matching check digit; never
/// panics.
pub fn validate_nip(nip: &str) -> bool {
    check(&normalize_nip(nip)).is_ok()
}

/// Format a NIP as `XXX-XXX-XX-XX`.
///
/// The check digit is not verified. Input that does not reduce to exactly
/// ten digits is returned unchanged.
pub fn format_nip(nip: &str) -> String {
    let cleaned = normalize_nip(nip);
    if cleaned.len() != 10 || !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return nip.to_string();
    }
    format!(
        "{}-{}-{}-{}",
        &cleaned[..3],
        &cleaned[3..6],
        &cleaned[6..8],
        &cleaned[8..]
    )
}

/// A NIP known to carry a valid check digit.
///
/// Stored as ten bare digits; `Display` renders the grouped form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Nip(String);

impl Nip {
    /// Parse and validate a NIP, accepting whitespace and hyphens.
    pub fn parse(input: &str) -> Result<Self, NipError> {
        let cleaned = normalize_nip(input);
        check(&cleaned)?;
        Ok(Self(cleaned))
    }

    /// The ten bare digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tax office prefix (first three digits).
    pub fn tax_office_code(&self) -> &str {
        &self.0[..3]
    }
}

impl FromStr for Nip {
    type Err = NipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Nip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_nip(&self.0))
    }
}

impl AsRef<str> for Nip {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for Nip {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Nip {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Nip::parse(&raw).map_err(serde::de::Error::custom)
    }
}
