use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The entity a wishlist belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Owner {
    /// An animal sheltered by an organization.
    Animal(String),
    /// The organization itself (general needs, not tied to one animal).
    Organization(String),
}

impl Owner {
    pub fn animal(id: impl Into<String>) -> Self {
        Self::Animal(id.into())
    }

    pub fn organization(id: impl Into<String>) -> Self {
        Self::Organization(id.into())
    }

    /// The entity identifier without its kind.
    pub fn id(&self) -> &str {
        match self {
            Self::Animal(id) | Self::Organization(id) => id,
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Animal(id) => write!(f, "animal:{id}"),
            Self::Organization(id) => write!(f, "organization:{id}"),
        }
    }
}

/// One desired product line on a wishlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    /// Who needs the product.
    pub owner: Owner,
    /// Product identifier from the catalog.
    pub product_id: String,
    /// Desired quantity (at least 1 for a well-formed item).
    pub quantity: u32,
}

impl WishlistItem {
    pub fn new(owner: Owner, product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            owner,
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// Combined lookup key: owner + product.
///
/// Purchases for the same product on behalf of different owners must never
/// count toward each other's wishlists.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FulfillmentKey {
    pub owner: Owner,
    pub product_id: String,
}

impl FulfillmentKey {
    pub fn new(owner: Owner, product_id: impl Into<String>) -> Self {
        Self {
            owner,
            product_id: product_id.into(),
        }
    }
}

impl From<&WishlistItem> for FulfillmentKey {
    fn from(item: &WishlistItem) -> Self {
        Self::new(item.owner.clone(), item.product_id.clone())
    }
}

/// Order lifecycle. Only completed orders count toward fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Paid,
    Completed,
    Cancelled,
}

/// A purchased product line inside an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Who the purchase was made for.
    pub owner: Owner,
    pub product_id: String,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(owner: Owner, product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            owner,
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A donor's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub status: OrderStatus,
    pub lines: Vec<OrderLine>,
    pub created_at: DateTime<Utc>,
    /// Set when the order reached [`OrderStatus::Completed`].
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn new(id: impl Into<String>, status: OrderStatus, lines: Vec<OrderLine>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            status,
            lines,
            created_at: now,
            completed_at: (status == OrderStatus::Completed).then_some(now),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }
}

/// Catalog product (admin CRUD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit price in PLN.
    pub price: Decimal,
    pub category: Option<String>,
}

/// Organization profile as edited by the organization itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationProfile {
    pub name: String,
    /// NIP as typed; validated, not normalized.
    pub nip: String,
    pub email: String,
    pub phone: Option<String>,
    pub street: Option<String>,
    pub postal_code: String,
    pub city: String,
    pub website: Option<String>,
    /// KRS register number, if the organization is registered.
    pub krs: Option<String>,
    pub description: Option<String>,
}

/// Lead-generation form submitted by an organization that wants to join.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub organization_name: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub nip: Option<String>,
    pub message: Option<String>,
    /// Data-processing consent checkbox.
    pub consent: bool,
}
