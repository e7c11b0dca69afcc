use std::collections::HashMap;

use rust_decimal_macros::dec;
use shelterwish::core::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ShelterError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let burek = Owner::animal("burek");
    let azyl = Owner::organization("psi-azyl");

    let mut store = InMemoryStore::new();
    store.add_item(WishlistItem::new(burek.clone(), "karma-10kg", 2))?;
    store.add_item(WishlistItem::new(burek.clone(), "smycz", 1))?;
    store.add_item(WishlistItem::new(burek.clone(), "legowisko", 1))?;
    store.add_item(WishlistItem::new(azyl.clone(), "koc", 20))?;

    store.add_order(Order::new(
        "ZAM-001",
        OrderStatus::Completed,
        vec![
            OrderLine::new(burek.clone(), "karma-10kg", 2),
            OrderLine::new(azyl.clone(), "koc", 8),
        ],
    ));
    store.add_order(Order::new(
        "ZAM-002",
        OrderStatus::Pending,
        vec![OrderLine::new(burek.clone(), "smycz", 1)],
    ));

    let service = FulfillmentService::new(&store);

    println!("=== Wishlist progress ===\n");
    for (owner, result) in service.all_progress()? {
        println!(
            "  {owner}: {}/{} items, {}%",
            result.fulfilled, result.total_needed, result.progress
        );
    }

    println!("\n=== Breakdown for {burek} ===\n");
    let summary = service.summary_for(&burek)?;
    for item in &summary.items {
        println!(
            "  {:<12} wanted {:>2}, bought {:>2}, remaining {:>2}{}",
            item.product_id,
            item.desired,
            item.purchased,
            item.remaining,
            if item.fulfilled { "  ✓" } else { "" }
        );
    }

    let prices = HashMap::from([
        ("karma-10kg".to_string(), dec!(89.99)),
        ("smycz".to_string(), dec!(35.00)),
        ("legowisko".to_string(), dec!(120.00)),
    ]);
    let items = store.wishlist(&burek)?;
    let orders = store.orders_for(&burek)?;
    let still_needed = outstanding_value(&items, &purchased_by_owner(&orders), &prices)?;
    println!("\n  Still needed: {still_needed} PLN");

    Ok(())
}
