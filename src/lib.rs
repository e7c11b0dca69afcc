//! # shelterwish
//!
//! Domain core of a donation marketplace connecting animal-welfare
//! organizations, the animals they shelter, and donors who buy wishlist
//! items for them.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Progress percentages are computed in integer arithmetic.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::collections::HashMap;
//! use shelterwish::core::*;
//!
//! assert!(validate_nip("526-000-12-46"));
//! assert_eq!(format_nip("5260001246"), "526-000-12-46");
//!
//! let dog = Owner::animal("burek");
//! let items = vec![
//!     WishlistItem::new(dog.clone(), "karma-10kg", 2),
//!     WishlistItem::new(dog.clone(), "smycz", 1),
//! ];
//! let purchased = HashMap::from([("karma-10kg".to_string(), 2)]);
//!
//! let result = compute_fulfillment(&items, &purchased);
//! assert_eq!(result.total_needed, 2);
//! assert_eq!(result.fulfilled, 1);
//! assert_eq!(result.progress, 50);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | NIP validation, wishlist fulfillment, form validation, storage gateway |
//! | `registry` | Polish VAT whitelist and KRS lookups |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "registry")]
pub mod registry;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
