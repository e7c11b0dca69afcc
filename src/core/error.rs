use std::fmt;

use thiserror::Error;

use super::nip::NipError;

/// Errors that can occur in the wishlist core.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShelterError {
    /// One or more validation rules failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Builder encountered invalid or missing configuration.
    #[error("builder error: {0}")]
    Builder(String),

    /// A NIP could not be parsed.
    #[error(transparent)]
    Nip(#[from] NipError),

    /// The storage gateway failed to read or write records.
    #[error("store error: {0}")]
    Store(String),

    /// A money amount left the range `Decimal` can represent.
    #[error("amount out of range: {0}")]
    Overflow(String),
}

/// Family a validation rule belongs to. Each family has its own code prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum RuleGroup {
    /// Organization profile (`ORG`).
    Organization,
    /// Lead-generation form (`LEAD`).
    Lead,
    /// Catalog product (`PRD`).
    Product,
    /// Wishlist item (`WSH`).
    Wishlist,
}

impl RuleGroup {
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Organization => "ORG",
            Self::Lead => "LEAD",
            Self::Product => "PRD",
            Self::Wishlist => "WSH",
        }
    }
}

/// Stable identifier of a validation rule, rendered as e.g. `ORG-02`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleCode {
    pub group: RuleGroup,
    pub number: u8,
}

impl RuleCode {
    pub const fn new(group: RuleGroup, number: u8) -> Self {
        Self { group, number }
    }

    pub const fn org(number: u8) -> Self {
        Self::new(RuleGroup::Organization, number)
    }

    pub const fn lead(number: u8) -> Self {
        Self::new(RuleGroup::Lead, number)
    }

    pub const fn product(number: u8) -> Self {
        Self::new(RuleGroup::Product, number)
    }

    pub const fn wishlist(number: u8) -> Self {
        Self::new(RuleGroup::Wishlist, number)
    }
}

impl fmt::Display for RuleCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.group.prefix(), self.number)
    }
}

/// A failed form rule: which field, which rule, and what the user should fix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub rule: RuleCode,
    /// Dotted field path, e.g. `lead.email`.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(rule: RuleCode, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            rule,
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.field, self.message)
    }
}
