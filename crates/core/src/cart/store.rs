//! Cart store

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    pricing,
    storage::{KeyValueStore, StorageError},
};

use super::{
    CART_STORAGE_KEY, CartLineItem, LineItemId, NewLineItem,
    snapshot::{self, SnapshotError},
};

/// The active cart, persisted to a [`KeyValueStore`].
///
/// Construct one per session and hand it to the views that need it. Mutations
/// never fail from the caller's point of view: storage problems are logged and
/// the in-memory cart stays authoritative.
#[derive(Debug)]
pub struct CartStore<S> {
    items: Vec<CartLineItem>,
    storage: S,
    key: String,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Opens the cart stored under [`CART_STORAGE_KEY`].
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, CART_STORAGE_KEY)
    }

    /// Opens the cart stored under `key`.
    ///
    /// A missing, unreadable or malformed snapshot yields an empty cart.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();

        let raw = storage.read(&key).unwrap_or_else(|error| {
            warn!(%error, %key, "failed to read cart snapshot");
            None
        });

        let items = snapshot::decode_or_empty(raw.as_deref());

        debug!(%key, items = items.len(), "cart restored");

        Self {
            items,
            storage,
            key,
        }
    }

    /// Line items in display order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up a line item by id.
    pub fn get(&self, id: &LineItemId) -> Option<&CartLineItem> {
        self.items.iter().find(|item| item.id == *id)
    }

    /// Number of line items (not units).
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart holds no line items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of every line item's quantity.
    pub fn total_items(&self) -> u64 {
        pricing::total_items(&self.items)
    }

    /// Sum of every line item's total, add-ons included.
    pub fn total_amount(&self) -> Decimal {
        pricing::total_amount(&self.items)
    }

    /// Storage backing this cart.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Appends a line item and returns its freshly generated id.
    pub fn add_item(&mut self, item: NewLineItem) -> LineItemId {
        let id = LineItemId::generate(&item.menu_item_id);

        debug!(
            %id,
            menu_item_id = %item.menu_item_id,
            quantity = item.quantity,
            "adding line item"
        );

        self.items.push(item.into_line_item(id.clone()));
        self.persist();

        id
    }

    /// Sets the quantity of a line item, removing it when `quantity` is zero or
    /// negative. Unknown ids are ignored.
    pub fn update_quantity(&mut self, id: &LineItemId, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(id);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|item| item.id == *id) {
            item.quantity = quantity.unsigned_abs();
            debug!(%id, quantity, "line item quantity updated");
        }

        self.persist();
    }

    /// Removes a line item. Unknown ids are ignored.
    pub fn remove_item(&mut self, id: &LineItemId) {
        self.items.retain(|item| item.id != *id);

        debug!(%id, "line item removed");

        self.persist();
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();

        debug!("cart cleared");

        self.persist();
    }

    fn persist(&self) {
        if let Err(error) = self.try_persist() {
            warn!(%error, key = %self.key, "failed to persist cart snapshot");
        }
    }

    fn try_persist(&self) -> Result<(), PersistError> {
        let raw = snapshot::encode(&self.items)?;

        self.storage.write(&self.key, &raw)?;

        Ok(())
    }
}

#[derive(Debug, Error)]
enum PersistError {
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        cart::{Addons, CartAddon},
        storage::MemoryStore,
    };

    use super::*;

    fn product(menu_item_id: &str, base_price: i64, quantity: u32) -> NewLineItem {
        NewLineItem {
            menu_item_id: menu_item_id.to_string(),
            name: menu_item_id.to_uppercase(),
            image: String::new(),
            base_price: Decimal::from(base_price),
            quantity,
            addons: Addons::new(),
            notes: None,
        }
    }

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable)
        }

        fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable)
        }
    }

    #[test]
    fn walkthrough_of_a_typical_order() {
        let mut cart = CartStore::open(MemoryStore::new());

        let mut p1 = product("p1", 70, 1);
        p1.addons.push(CartAddon::new("a1", "Extra shot", Decimal::from(10)));

        let p1 = cart.add_item(p1);

        assert_eq!(cart.total_amount(), Decimal::from(80));
        assert_eq!(cart.total_items(), 1);

        cart.add_item(product("p2", 60, 2));

        assert_eq!(cart.total_amount(), Decimal::from(200));
        assert_eq!(cart.total_items(), 3);

        cart.update_quantity(&p1, 0);

        assert!(cart.get(&p1).is_none());
        assert_eq!(cart.total_amount(), Decimal::from(120));
        assert_eq!(cart.total_items(), 2);

        cart.clear();

        assert_eq!(cart.total_amount(), Decimal::ZERO);
        assert_eq!(cart.total_items(), 0);
    }

    #[test]
    fn add_item_appends_in_order() {
        let mut cart = CartStore::open(MemoryStore::new());

        cart.add_item(product("p1", 70, 1));
        cart.add_item(product("p2", 60, 1));
        cart.add_item(product("p1", 70, 1));

        let names: Vec<&str> = cart
            .items()
            .iter()
            .map(|item| item.menu_item_id.as_str())
            .collect();

        assert_eq!(names, ["p1", "p2", "p1"]);
    }

    #[test]
    fn identical_payloads_get_distinct_ids() {
        let mut cart = CartStore::open(MemoryStore::new());

        let first = cart.add_item(product("p1", 70, 1));
        let second = cart.add_item(product("p1", 70, 1));

        assert_ne!(first, second);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn update_quantity_keeps_position_and_other_fields() {
        let mut cart = CartStore::open(MemoryStore::new());

        cart.add_item(product("p1", 70, 1));
        let id = cart.add_item(product("p2", 60, 1));
        cart.add_item(product("p3", 50, 1));

        let before = cart.get(&id).cloned();

        cart.update_quantity(&id, 4);

        let after = cart.items().get(1);

        assert_eq!(after.map(|item| item.quantity), Some(4));
        assert_eq!(after.map(|item| &item.id), Some(&id));
        assert_eq!(
            after.map(|item| item.base_price),
            before.map(|item| item.base_price)
        );
    }

    #[test]
    fn negative_quantity_removes_like_remove_item() {
        let mut by_update = CartStore::open(MemoryStore::new());
        let mut by_remove = CartStore::open(MemoryStore::new());

        let a = by_update.add_item(product("p1", 70, 2));
        let b = by_remove.add_item(product("p1", 70, 2));

        by_update.update_quantity(&a, -3);
        by_remove.remove_item(&b);

        assert!(by_update.is_empty());
        assert_eq!(by_update.items(), by_remove.items());
    }

    #[test]
    fn unknown_ids_are_ignored() {
        let mut cart = CartStore::open(MemoryStore::new());
        cart.add_item(product("p1", 70, 1));

        let missing = LineItemId::from("missing");

        cart.update_quantity(&missing, 3);
        cart.remove_item(&missing);

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_items(), 1);
    }

    #[test]
    fn clearing_an_empty_cart_is_harmless() {
        let mut cart = CartStore::open(MemoryStore::new());

        cart.clear();
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total_amount(), Decimal::ZERO);
    }

    #[test]
    fn every_mutation_is_persisted() -> TestResult {
        let storage = MemoryStore::new();
        let mut cart = CartStore::open(storage.clone());

        let id = cart.add_item(product("p1", 70, 1));
        cart.update_quantity(&id, 3);

        let reopened = CartStore::open(storage.clone());

        assert_eq!(reopened.items(), cart.items());
        assert_eq!(reopened.total_items(), 3);

        cart.clear();

        assert_eq!(storage.read(CART_STORAGE_KEY)?.as_deref(), Some("[]"));

        Ok(())
    }

    #[test]
    fn custom_keys_are_isolated() {
        let storage = MemoryStore::new();

        let mut first = CartStore::open_with_key(storage.clone(), "first");
        first.add_item(product("p1", 70, 1));

        let second = CartStore::open_with_key(storage, "second");

        assert!(second.is_empty());
    }

    #[test]
    fn malformed_snapshot_opens_empty() {
        let storage = MemoryStore::with_entry(CART_STORAGE_KEY, "{definitely not a cart");

        let cart = CartStore::open(storage);

        assert!(cart.is_empty());
    }

    #[test]
    fn snapshots_with_out_of_range_prices_restore_safely() {
        let storage = MemoryStore::with_entry(
            CART_STORAGE_KEY,
            r#"[{"id":"a","menuItemId":"a","name":"A","basePrice":"79228162514264337593543950335","quantity":2}]"#,
        );

        let mut cart = CartStore::open(storage);

        assert!(cart.is_empty());
        assert_eq!(cart.total_amount(), Decimal::ZERO);

        let mut dear = product("p1", 0, 3);
        dear.base_price = Decimal::MAX;
        cart.add_item(dear);

        assert_eq!(cart.total_amount(), Decimal::MAX);
    }

    #[test]
    fn storage_failures_never_reach_the_caller() {
        let mut cart = CartStore::open(BrokenStore);

        let id = cart.add_item(product("p1", 70, 2));
        cart.update_quantity(&id, 5);

        assert_eq!(cart.total_items(), 5);
        assert_eq!(cart.total_amount(), Decimal::from(350));

        cart.clear();

        assert!(cart.is_empty());
    }
}
