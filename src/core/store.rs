//! Storage gateway and the fulfillment service built on top of it.
//!
//! Durable state lives in an external database. Components that need
//! wishlists or orders take a [`WishlistStore`] instead of reaching for a
//! global client.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::error::ShelterError;
use super::fulfillment::{
    FulfillmentResult, ItemStatus, compute_scoped_fulfillment, item_statuses, purchased_by_owner,
};
use super::types::{Order, Owner, WishlistItem};
use super::validation::validate_wishlist_item;

/// Read access to wishlists and purchase records.
pub trait WishlistStore {
    /// Wishlist line items of one owner, in display order.
    fn wishlist(&self, owner: &Owner) -> Result<Vec<WishlistItem>, ShelterError>;

    /// Orders that contain at least one line bought for `owner`.
    fn orders_for(&self, owner: &Owner) -> Result<Vec<Order>, ShelterError>;

    /// Every owner that has a wishlist.
    fn owners(&self) -> Result<Vec<Owner>, ShelterError>;
}

impl<S: WishlistStore + ?Sized> WishlistStore for &S {
    fn wishlist(&self, owner: &Owner) -> Result<Vec<WishlistItem>, ShelterError> {
        (**self).wishlist(owner)
    }

    fn orders_for(&self, owner: &Owner) -> Result<Vec<Order>, ShelterError> {
        (**self).orders_for(owner)
    }

    fn owners(&self) -> Result<Vec<Owner>, ShelterError> {
        (**self).owners()
    }
}

/// `HashMap`-backed store for tests and demos.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    wishlists: HashMap<Owner, Vec<WishlistItem>>,
    orders: Vec<Order>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a wishlist item after validating it.
    pub fn add_item(&mut self, item: WishlistItem) -> Result<(), ShelterError> {
        let errors = validate_wishlist_item(&item);
        if let Some(first) = errors.first() {
            return Err(ShelterError::Validation(first.to_string()));
        }
        self.wishlists
            .entry(item.owner.clone())
            .or_default()
            .push(item);
        Ok(())
    }

    pub fn add_order(&mut self, order: Order) {
        self.orders.push(order);
    }

    /// Replace an order with the same id, e.g. after a status change.
    pub fn update_order(&mut self, order: Order) -> Result<(), ShelterError> {
        let slot = self
            .orders
            .iter_mut()
            .find(|o| o.id == order.id)
            .ok_or_else(|| ShelterError::Store(format!("order '{}' not found", order.id)))?;
        *slot = order;
        Ok(())
    }
}

impl WishlistStore for InMemoryStore {
    fn wishlist(&self, owner: &Owner) -> Result<Vec<WishlistItem>, ShelterError> {
        Ok(self.wishlists.get(owner).cloned().unwrap_or_default())
    }

    fn orders_for(&self, owner: &Owner) -> Result<Vec<Order>, ShelterError> {
        Ok(self
            .orders
            .iter()
            .filter(|o| o.lines.iter().any(|l| &l.owner == owner))
            .cloned()
            .collect())
    }

    fn owners(&self) -> Result<Vec<Owner>, ShelterError> {
        let mut owners: Vec<Owner> = self.wishlists.keys().cloned().collect();
        owners.sort();
        Ok(owners)
    }
}

/// Fulfillment of one owner's wishlist with the per-item breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentSummary {
    pub owner: Owner,
    pub result: FulfillmentResult,
    pub items: Vec<ItemStatus>,
}

/// Computes wishlist progress from whatever a [`WishlistStore`] returns.
///
/// Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct FulfillmentService<S> {
    store: S,
}

impl<S: WishlistStore> FulfillmentService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    /// Aggregate fulfillment for one owner.
    pub fn progress_for(&self, owner: &Owner) -> Result<FulfillmentResult, ShelterError> {
        let items = self.store.wishlist(owner)?;
        let orders = self.store.orders_for(owner)?;
        let purchased = purchased_by_owner(&orders);
        let result = compute_scoped_fulfillment(&items, &purchased);
        debug!(
            %owner,
            total = result.total_needed,
            fulfilled = result.fulfilled,
            progress = result.progress,
            "computed wishlist progress"
        );
        Ok(result)
    }

    /// Aggregate fulfillment plus the per-item breakdown.
    pub fn summary_for(&self, owner: &Owner) -> Result<FulfillmentSummary, ShelterError> {
        let items = self.store.wishlist(owner)?;
        let orders = self.store.orders_for(owner)?;
        let purchased = purchased_by_owner(&orders);
        Ok(FulfillmentSummary {
            owner: owner.clone(),
            result: compute_scoped_fulfillment(&items, &purchased),
            items: item_statuses(&items, &purchased),
        })
    }

    /// Progress of every owner with a wishlist, sorted by owner.
    ///
    /// Fails on the first store error.
    pub fn all_progress(&self) -> Result<Vec<(Owner, FulfillmentResult)>, ShelterError> {
        let owners: BTreeSet<Owner> = self.store.owners()?.into_iter().collect();
        owners
            .into_iter()
            .map(|owner| {
                let result = self.progress_for(&owner).inspect_err(|e| {
                    warn!(%owner, error = %e, "failed to compute wishlist progress");
                })?;
                Ok((owner, result))
            })
            .collect()
    }
}
