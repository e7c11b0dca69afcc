use rust_decimal::Decimal;

use super::error::{RuleCode, ValidationError};
use super::nip::{Nip, NipError, normalize_nip};
use super::types::*;

/// Validate an organization profile.
/// Returns all validation errors found (not just the first).
pub fn validate_organization_profile(profile: &OrganizationProfile) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if profile.name.trim().is_empty() {
        errors.push(ValidationError::new(
            RuleCode::org(1),
            "profile.name",
            "organization name must not be empty",
        ));
    }

    validate_nip_field(&profile.nip, "profile.nip", RuleCode::org(2), &mut errors);
    validate_email(&profile.email, "profile.email", RuleCode::org(3), &mut errors);

    if !is_polish_postal_code(profile.postal_code.trim()) {
        errors.push(ValidationError::new(
            RuleCode::org(4),
            "profile.postal_code",
            format!(
                "postal code must have the form NN-NNN (e.g. 00-950), got: '{}'",
                profile.postal_code
            ),
        ));
    }

    if profile.city.trim().is_empty() {
        errors.push(ValidationError::new(
            RuleCode::org(5),
            "profile.city",
            "city must not be empty",
        ));
    }

    if let Some(phone) = &profile.phone {
        validate_phone(phone, "profile.phone", RuleCode::org(6), &mut errors);
    }

    if let Some(website) = &profile.website {
        let w = website.trim();
        if !(w.starts_with("https://") || w.starts_with("http://")) || w.len() <= "https://".len()
        {
            errors.push(ValidationError::new(
            RuleCode::org(7),
                "profile.website",
                format!("website must be an http(s) URL, got: '{website}'"),
            ));
        }
    }

    if let Some(krs) = &profile.krs {
        let k = krs.trim();
        if k.len() != 10 || !k.chars().all(|c| c.is_ascii_digit()) {
            errors.push(ValidationError::new(
            RuleCode::org(8),
                "profile.krs",
                format!("KRS number must be exactly 10 digits, got: '{krs}'"),
            ));
        }
    }

    errors
}

/// Validate a lead-generation submission.
pub fn validate_lead(lead: &Lead) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if lead.organization_name.trim().is_empty() {
        errors.push(ValidationError::new(
            RuleCode::lead(1),
            "lead.organization_name",
            "organization name must not be empty",
        ));
    }
    if lead.contact_name.trim().is_empty() {
        errors.push(ValidationError::new(
            RuleCode::lead(2),
            "lead.contact_name",
            "contact name must not be empty",
        ));
    }
    validate_email(&lead.email, "lead.email", RuleCode::lead(3), &mut errors);

    // NIP is optional on a lead, but if given it must be valid
    if let Some(nip) = lead.nip.as_deref().filter(|n| !n.trim().is_empty()) {
        validate_nip_field(nip, "lead.nip", RuleCode::lead(4), &mut errors);
    }
    if let Some(phone) = &lead.phone {
        validate_phone(phone, "lead.phone", RuleCode::lead(6), &mut errors);
    }

    if !lead.consent {
        errors.push(ValidationError::new(
            RuleCode::lead(5),
            "lead.consent",
            "consent to data processing is required",
        ));
    }

    errors
}

/// Validate a catalog product (admin CRUD).
pub fn validate_product(product: &Product) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if product.name.trim().is_empty() {
        errors.push(ValidationError::new(
            RuleCode::product(1),
            "product.name",
            "product name must not be empty",
        ));
    }
    if product.price < Decimal::ZERO {
        errors.push(ValidationError::new(
            RuleCode::product(2),
            "product.price",
            format!("price must not be negative, got {}", product.price),
        ));
    }
    if product.price.normalize().scale() > 2 {
        errors.push(ValidationError::new(
            RuleCode::product(3),
            "product.price",
            format!("price must have at most 2 decimal places, got {}", product.price),
        ));
    }

    errors
}

/// Validate a single wishlist item before it is stored.
pub fn validate_wishlist_item(item: &WishlistItem) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if item.product_id.trim().is_empty() {
        errors.push(ValidationError::new(
            RuleCode::wishlist(1),
            "item.product_id",
            "product id must not be empty",
        ));
    }
    if item.quantity == 0 {
        errors.push(ValidationError::new(
            RuleCode::wishlist(2),
            "item.quantity",
            "desired quantity must be at least 1",
        ));
    }

    errors
}

fn validate_nip_field(nip: &str, field: &str, rule: RuleCode, errors: &mut Vec<ValidationError>) {
    let message = match Nip::parse(nip) {
        Ok(_) => return,
        Err(NipError::Length { found }) => format!(
            "NIP must have 10 digits, got {found} in '{}'",
            normalize_nip(nip)
        ),
        Err(NipError::NonDigit { found, .. }) => {
            format!("NIP may only contain digits, spaces and hyphens, found '{found}'")
        }
        Err(e) => format!("invalid NIP checksum: {e}"),
    };
    errors.push(ValidationError::new(rule, field, message));
}

fn validate_email(email: &str, field: &str, rule: RuleCode, errors: &mut Vec<ValidationError>) {
    if !looks_like_email(email.trim()) {
        errors.push(ValidationError::new(
            rule,
            field,
            format!("invalid email address: '{email}'"),
        ));
    }
}

fn validate_phone(phone: &str, field: &str, rule: RuleCode, errors: &mut Vec<ValidationError>) {
    let digits: String = phone
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '+')
        .collect();
    if !(9..=15).contains(&digits.len()) || !digits.chars().all(|c| c.is_ascii_digit()) {
        errors.push(ValidationError::new(
            rule,
            field,
            format!("phone number must have 9-15 digits, got: '{phone}'"),
        ));
    }
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
        && !domain.ends_with('.')
}

fn is_polish_postal_code(code: &str) -> bool {
    let b = code.as_bytes();
    b.len() == 6
        && b[2] == b'-'
        && b[..2].iter().all(u8::is_ascii_digit)
        && b[3..].iter().all(u8::is_ascii_digit)
}
