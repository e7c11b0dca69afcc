//! Core wishlist types, NIP validation, fulfillment, and data-entry validation.
//!
//! This module is pure computation. Storage is reached only through the
//! [`WishlistStore`] gateway.

mod builder;
mod error;
mod fulfillment;
pub mod nip;
mod store;
mod types;
mod validation;

pub use builder::*;
pub use error::*;
pub use fulfillment::*;
pub use nip::{NIP_WEIGHTS, Nip, NipError, format_nip, nip_check_digit, normalize_nip, validate_nip};
pub use store::*;
pub use types::*;
pub use validation::*;
