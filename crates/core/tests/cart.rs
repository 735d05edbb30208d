//! Cart store behaviour over long, mixed operation sequences.

use brewdesk::{
    cart::{Addons, CART_STORAGE_KEY, CartAddon, CartStore, LineItemId, NewLineItem, snapshot},
    storage::{KeyValueStore, MemoryStore},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use testresult::TestResult;

fn random_item(rng: &mut StdRng) -> NewLineItem {
    let product = rng.gen_range(1..=5);

    let addons = (0..rng.gen_range(0..3))
        .map(|n| {
            let mut addon = CartAddon::new(
                format!("addon-{n}"),
                format!("Addon {n}"),
                Decimal::new(rng.gen_range(0..2_000), 2),
            );
            addon.quantity = rng.gen_range(1..=2);
            addon
        })
        .collect::<Addons>();

    NewLineItem {
        menu_item_id: format!("product-{product}"),
        name: format!("Product {product}"),
        image: format!("product-{product}.png"),
        base_price: Decimal::new(rng.gen_range(5_000..20_000), 2),
        quantity: rng.gen_range(1..=4),
        addons,
        notes: rng.gen_bool(0.3).then(|| "no sugar".to_string()),
    }
}

fn recomputed_total(store: &CartStore<MemoryStore>) -> Decimal {
    store
        .items()
        .iter()
        .map(|item| {
            let addons: Decimal = item
                .addons
                .iter()
                .map(|addon| addon.price * Decimal::from(addon.quantity))
                .sum();

            (item.base_price + addons) * Decimal::from(item.quantity)
        })
        .sum()
}

fn pick(rng: &mut StdRng, store: &CartStore<MemoryStore>) -> LineItemId {
    let ids: Vec<&LineItemId> = store.items().iter().map(|item| &item.id).collect();

    if ids.is_empty() || rng.gen_bool(0.1) {
        return LineItemId::from("not-in-cart");
    }

    let index = rng.gen_range(0..ids.len());

    ids.get(index)
        .map_or_else(|| LineItemId::from("not-in-cart"), |id| (*id).clone())
}

#[test]
fn totals_always_match_a_fresh_recomputation() -> TestResult {
    let mut rng = StdRng::seed_from_u64(0x00C0_FFEE);
    let storage = MemoryStore::new();
    let mut store = CartStore::open(storage.clone());

    for _ in 0..2_000 {
        match rng.gen_range(0..10) {
            0..=3 => {
                store.add_item(random_item(&mut rng));
            }
            4..=6 => {
                let id = pick(&mut rng, &store);
                store.update_quantity(&id, rng.gen_range(-2..=6));
            }
            7 | 8 => {
                let id = pick(&mut rng, &store);
                store.remove_item(&id);
            }
            _ => {
                if rng.gen_bool(0.2) {
                    store.clear();
                }
            }
        }

        assert_eq!(store.total_amount(), recomputed_total(&store));
        assert_eq!(
            store.total_items(),
            store
                .items()
                .iter()
                .map(|item| u64::from(item.quantity))
                .sum::<u64>()
        );
        assert!(store.items().iter().all(|item| item.quantity >= 1));

        let persisted = storage.read(CART_STORAGE_KEY)?;
        assert_eq!(snapshot::decode_or_empty(persisted.as_deref()), store.items());
    }

    Ok(())
}

#[test]
fn rapid_adds_of_the_same_payload_have_unique_ids() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut store = CartStore::open(MemoryStore::new());
    let item = random_item(&mut rng);

    let ids: FxHashSet<LineItemId> = (0..500).map(|_| store.add_item(item.clone())).collect();

    assert_eq!(ids.len(), 500);
    assert_eq!(store.len(), 500);
}

#[test]
fn reopening_restores_the_same_cart() {
    let mut rng = StdRng::seed_from_u64(42);
    let storage = MemoryStore::new();
    let mut store = CartStore::open(storage.clone());

    for _ in 0..20 {
        store.add_item(random_item(&mut rng));
    }

    let reopened = CartStore::open(storage);

    assert_eq!(reopened.items(), store.items());
    assert_eq!(reopened.total_amount(), store.total_amount());
}
