#![cfg(feature = "core")]

use std::cell::Cell;

use shelterwish::core::*;

fn seeded() -> InMemoryStore {
    let rex = Owner::animal("rex");
    let azyl = Owner::organization("psi-azyl");
    let mut store = InMemoryStore::new();
    store.add_item(WishlistItem::new(rex.clone(), "karma", 2)).unwrap();
    store.add_item(WishlistItem::new(rex.clone(), "smycz", 1)).unwrap();
    store.add_item(WishlistItem::new(azyl.clone(), "koc", 10)).unwrap();
    store.add_order(Order::new(
        "o1",
        OrderStatus::Completed,
        vec![
            OrderLine::new(rex.clone(), "karma", 2),
            OrderLine::new(azyl.clone(), "koc", 4),
        ],
    ));
    store.add_order(Order::new(
        "o2",
        OrderStatus::Pending,
        vec![OrderLine::new(rex, "smycz", 1)],
    ));
    store
}

#[test]
fn progress_for_animal() {
    let service = FulfillmentService::new(seeded());
    let r = service.progress_for(&Owner::animal("rex")).unwrap();
    assert_eq!(r.total_needed, 2);
    assert_eq!(r.fulfilled, 1);
    assert_eq!(r.progress, 50);
}

#[test]
fn unknown_owner_has_empty_progress() {
    let service = FulfillmentService::new(seeded());
    let r = service.progress_for(&Owner::animal("ghost")).unwrap();
    assert_eq!(r, FulfillmentResult::default());
}

#[test]
fn recomputes_after_order_completes() {
    let mut store = seeded();
    let rex = Owner::animal("rex");
    assert_eq!(
        FulfillmentService::new(&store).progress_for(&rex).unwrap().progress,
        50
    );

    store
        .update_order(Order::new(
            "o2",
            OrderStatus::Completed,
            vec![OrderLine::new(rex.clone(), "smycz", 1)],
        ))
        .unwrap();
    assert_eq!(
        FulfillmentService::new(&store).progress_for(&rex).unwrap().progress,
        100
    );
}

#[test]
fn summary_has_item_breakdown() {
    let service = FulfillmentService::new(seeded());
    let summary = service.summary_for(&Owner::organization("psi-azyl")).unwrap();
    assert_eq!(summary.result.progress, 0);
    assert_eq!(summary.items.len(), 1);
    assert_eq!(summary.items[0].purchased, 4);
    assert_eq!(summary.items[0].remaining, 6);
}

#[test]
fn all_progress_sorted_by_owner() {
    let service = FulfillmentService::new(seeded());
    let all = service.all_progress().unwrap();
    // Animal sorts before Organization
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].0, Owner::animal("rex"));
    assert_eq!(all[0].1.progress, 50);
    assert_eq!(all[1].0, Owner::organization("psi-azyl"));
    assert_eq!(all[1].1.progress, 0);
}

/// Store that fails on order reads and counts wishlist reads.
struct FlakyStore {
    reads: Cell<u32>,
}

impl WishlistStore for FlakyStore {
    fn wishlist(&self, owner: &Owner) -> Result<Vec<WishlistItem>, ShelterError> {
        self.reads.set(self.reads.get() + 1);
        Ok(vec![WishlistItem::new(owner.clone(), "karma", 1)])
    }

    fn orders_for(&self, _owner: &Owner) -> Result<Vec<Order>, ShelterError> {
        Err(ShelterError::Store("connection reset".into()))
    }

    fn owners(&self) -> Result<Vec<Owner>, ShelterError> {
        Ok(vec![Owner::animal("rex")])
    }
}

#[test]
fn store_errors_propagate() {
    let service = FulfillmentService::new(FlakyStore {
        reads: Cell::new(0),
    });
    let err = service.progress_for(&Owner::animal("rex")).unwrap_err();
    assert!(matches!(err, ShelterError::Store(_)));
    assert!(service.all_progress().is_err());
    assert_eq!(service.store().reads.get(), 2);
}
