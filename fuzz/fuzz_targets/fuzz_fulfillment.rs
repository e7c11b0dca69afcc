#![no_main]

use std::collections::HashMap;

use libfuzzer_sys::fuzz_target;
use shelterwish::core::*;

fuzz_target!(|data: &[u8]| {
    // Pairs of (product byte, quantity byte)
    let items: Vec<WishlistItem> = data
        .chunks_exact(2)
        .map(|c| WishlistItem::new(Owner::animal("a"), (c[0] % 8).to_string(), u32::from(c[1])))
        .collect();
    let purchased: HashMap<String, u32> = data
        .iter()
        .rev()
        .take(8)
        .enumerate()
        .map(|(i, q)| (i.to_string(), u32::from(*q)))
        .collect();

    let r = compute_fulfillment(&items, &purchased);
    assert!(r.fulfilled <= r.total_needed);
    assert!(r.progress <= 100);
});
