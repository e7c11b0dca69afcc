//! Wishlist fulfillment: how many wishlist items are covered by completed
//! purchases, and the resulting progress percentage.
//!
//! Everything here is recomputed from source records on every call. There is
//! no running counter to drift out of sync with the orders it summarizes.

use std::collections::HashMap;
use std::hash::Hash;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ShelterError;
use super::types::{FulfillmentKey, Order, OrderLine, WishlistItem};

/// Aggregate fulfillment of a wishlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FulfillmentResult {
    /// Number of wishlist line items.
    pub total_needed: u32,
    /// Line items whose purchased quantity covers the desired quantity.
    pub fulfilled: u32,
    /// `round(100 * fulfilled / total_needed)`, 0 for an empty wishlist.
    pub progress: u8,
}

/// Fulfillment state of a single wishlist line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStatus {
    pub product_id: String,
    pub desired: u32,
    pub purchased: u32,
    /// `desired - purchased`, floored at zero.
    pub remaining: u32,
    pub fulfilled: bool,
}

/// Percentage of `fulfilled` out of `total`, rounded half-up.
///
/// Integer arithmetic only: `(200 * f + t) / (2 * t)`. Returns 0 when
/// `total` is 0 and saturates at 100.
pub fn progress_percent(fulfilled: u32, total: u32) -> u8 {
    if total == 0 {
        return 0;
    }
    let f = u64::from(fulfilled.min(total));
    let t = u64::from(total);
    ((200 * f + t) / (2 * t)) as u8
}

fn saturating_count(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn summarize<F>(items: &[WishlistItem], mut purchased: F) -> FulfillmentResult
where
    F: FnMut(&WishlistItem) -> u32,
{
    let total_needed = saturating_count(items.len());
    let fulfilled = saturating_count(
        items
            .iter()
            .filter(|&item| purchased(item) >= item.quantity)
            .count(),
    );
    FulfillmentResult {
        total_needed,
        fulfilled,
        progress: progress_percent(fulfilled, total_needed),
    }
}

/// Compute fulfillment with purchases keyed by product id only.
///
/// Duplicate product ids are independent line items: each one is compared
/// against the same purchased total. Products missing from `purchased` count
/// as zero.
pub fn compute_fulfillment(
    items: &[WishlistItem],
    purchased: &HashMap<String, u32>,
) -> FulfillmentResult {
    summarize(items, |item| {
        purchased.get(&item.product_id).copied().unwrap_or(0)
    })
}

/// Compute fulfillment with purchases keyed by owner + product.
pub fn compute_scoped_fulfillment(
    items: &[WishlistItem],
    purchased: &HashMap<FulfillmentKey, u32>,
) -> FulfillmentResult {
    summarize(items, |item| {
        purchased
            .get(&FulfillmentKey::from(item))
            .copied()
            .unwrap_or(0)
    })
}

/// Per-item breakdown, in wishlist order, using owner + product keys.
pub fn item_statuses(
    items: &[WishlistItem],
    purchased: &HashMap<FulfillmentKey, u32>,
) -> Vec<ItemStatus> {
    items
        .iter()
        .map(|item| {
            let bought = purchased
                .get(&FulfillmentKey::from(item))
                .copied()
                .unwrap_or(0);
            ItemStatus {
                product_id: item.product_id.clone(),
                desired: item.quantity,
                purchased: bought,
                remaining: item.quantity.saturating_sub(bought),
                fulfilled: bought >= item.quantity,
            }
        })
        .collect()
}

fn aggregate<K, F>(orders: &[Order], mut key: F) -> HashMap<K, u32>
where
    K: Eq + Hash,
    F: FnMut(&OrderLine) -> K,
{
    let mut totals: HashMap<K, u32> = HashMap::new();
    for line in orders
        .iter()
        .filter(|o| o.is_completed())
        .flat_map(|o| o.lines.iter())
    {
        let entry = totals.entry(key(line)).or_insert(0);
        *entry = entry.saturating_add(line.quantity);
    }
    totals
}

/// Sum purchased quantities per product over completed orders.
pub fn purchased_by_product(orders: &[Order]) -> HashMap<String, u32> {
    aggregate(orders, |line| line.product_id.clone())
}

/// Sum purchased quantities per owner + product over completed orders.
pub fn purchased_by_owner(orders: &[Order]) -> HashMap<FulfillmentKey, u32> {
    aggregate(orders, |line| {
        FulfillmentKey::new(line.owner.clone(), line.product_id.clone())
    })
}

/// Money still needed to complete the wishlist.
///
/// Remaining quantity times unit price, summed. Items whose product has no
/// known price contribute zero.
///
/// # Errors
///
/// Returns `ShelterError::Overflow` when a line amount or the running total
/// exceeds the range of `Decimal`.
pub fn outstanding_value(
    items: &[WishlistItem],
    purchased: &HashMap<FulfillmentKey, u32>,
    prices: &HashMap<String, Decimal>,
) -> Result<Decimal, ShelterError> {
    item_statuses(items, purchased)
        .iter()
        .filter_map(|status| prices.get(&status.product_id).map(|price| (status, *price)))
        .try_fold(Decimal::ZERO, |total, (status, price)| {
            price
                .checked_mul(Decimal::from(status.remaining))
                .and_then(|line| total.checked_add(line))
                .ok_or_else(|| {
                    ShelterError::Overflow(format!(
                        "outstanding value for product '{}' ({} x {price})",
                        status.product_id, status.remaining
                    ))
                })
        })
}
