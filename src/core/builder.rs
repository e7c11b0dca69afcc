use rust_decimal::Decimal;

use super::error::{ShelterError, ValidationError};
use super::types::*;
use super::validation;

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Builder for a validated organization profile.
///
/// ```
/// use shelterwish::core::*;
///
/// let profile = OrganizationProfileBuilder::new("Fundacja Psi Azyl", "526-000-12-46")
///     .email("kontakt@psiazyl.pl")
///     .address("ul. Leśna 4", "00-950", "Warszawa")
///     .phone("+48 600 100 200")
///     .build()
///     .unwrap();
///
/// assert_eq!(profile.city, "Warszawa");
/// ```
pub struct OrganizationProfileBuilder {
    name: String,
    nip: String,
    email: String,
    phone: Option<String>,
    street: Option<String>,
    postal_code: String,
    city: String,
    website: Option<String>,
    krs: Option<String>,
    description: Option<String>,
}

impl OrganizationProfileBuilder {
    pub fn new(name: impl Into<String>, nip: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nip: nip.into(),
            email: String::new(),
            phone: None,
            street: None,
            postal_code: String::new(),
            city: String::new(),
            website: None,
            krs: None,
            description: None,
        }
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    pub fn address(
        mut self,
        street: impl Into<String>,
        postal_code: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        self.street = Some(street.into());
        self.postal_code = postal_code.into();
        self.city = city.into();
        self
    }

    pub fn website(mut self, url: impl Into<String>) -> Self {
        self.website = Some(url.into());
        self
    }

    pub fn krs(mut self, krs: impl Into<String>) -> Self {
        self.krs = Some(krs.into());
        self
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    /// Build and validate. All failed rules are reported in one error.
    pub fn build(self) -> Result<OrganizationProfile, ShelterError> {
        let profile = self.build_unchecked();
        let errors = validation::validate_organization_profile(&profile);
        if !errors.is_empty() {
            return Err(ShelterError::Validation(join_errors(&errors)));
        }
        Ok(profile)
    }

    /// Build without validation, e.g. when importing existing records.
    pub fn build_unchecked(self) -> OrganizationProfile {
        OrganizationProfile {
            name: self.name,
            nip: self.nip,
            email: self.email,
            phone: self.phone,
            street: self.street,
            postal_code: self.postal_code,
            city: self.city,
            website: self.website,
            krs: self.krs,
            description: self.description,
        }
    }
}

/// Builder for a catalog product.
pub struct ProductBuilder {
    id: String,
    name: String,
    price: Decimal,
    category: Option<String>,
}

impl ProductBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            category: None,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn build(self) -> Result<Product, ShelterError> {
        if self.id.trim().is_empty() {
            return Err(ShelterError::Builder("product id is required".into()));
        }
        let product = Product {
            id: self.id,
            name: self.name,
            price: self.price,
            category: self.category,
        };
        let errors = validation::validate_product(&product);
        if !errors.is_empty() {
            return Err(ShelterError::Validation(join_errors(&errors)));
        }
        Ok(product)
    }
}
