//! Product customisation
//!
//! Collects the choices a customer makes on a product page (add-ons, quantity,
//! notes) and turns them into a cart line item.

use brewdesk::{
    cart::{Addons, CartAddon, NewLineItem},
    pricing,
};
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;

use crate::domain::menu::models::{Addon, AddonUuid, MenuItem};

/// In-progress customisation of a single menu item.
#[derive(Debug, Clone)]
pub struct Customisation<'a> {
    item: &'a MenuItem,
    catalogue: &'a [Addon],
    selected: FxHashSet<AddonUuid>,
    quantity: u32,
    notes: String,
}

impl<'a> Customisation<'a> {
    /// Starts a customisation of `item` with one unit and nothing selected.
    ///
    /// `catalogue` is the add-on list offered alongside the item.
    #[must_use]
    pub fn new(item: &'a MenuItem, catalogue: &'a [Addon]) -> Self {
        Self {
            item,
            catalogue,
            selected: FxHashSet::default(),
            quantity: 1,
            notes: String::new(),
        }
    }

    pub fn item(&self) -> &MenuItem {
        self.item
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn is_selected(&self, addon: AddonUuid) -> bool {
        self.selected.contains(&addon)
    }

    /// Selects an add-on, or deselects it if already selected. Add-ons that are
    /// not in the catalogue are ignored.
    pub fn toggle_addon(&mut self, addon: AddonUuid) {
        if !self.catalogue.iter().any(|entry| entry.uuid == addon) {
            return;
        }

        if !self.selected.remove(&addon) {
            self.selected.insert(addon);
        }
    }

    /// Sets the number of units, never below one.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    pub fn decrement(&mut self) {
        self.set_quantity(self.quantity.saturating_sub(1));
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = notes.into();
    }

    /// Selected add-ons in catalogue order.
    pub fn addons(&self) -> Addons {
        self.catalogue
            .iter()
            .filter(|addon| self.selected.contains(&addon.uuid))
            .map(|addon| CartAddon::new(addon.uuid.to_string(), addon.name.clone(), addon.price))
            .collect()
    }

    /// `(base + selected add-ons) × quantity`
    pub fn preview_total(&self) -> Decimal {
        pricing::line_total(self.item.base_price, &self.addons(), self.quantity)
    }

    /// Builds the line item to hand to the cart.
    pub fn to_line_item(&self) -> NewLineItem {
        let notes = self.notes.trim();

        NewLineItem {
            menu_item_id: self.item.uuid.to_string(),
            name: self.item.name.clone(),
            image: self.item.image_url.clone().unwrap_or_default(),
            base_price: self.item.base_price,
            quantity: self.quantity,
            addons: self.addons(),
            notes: (!notes.is_empty()).then(|| notes.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use brewdesk::{cart::CartStore, storage::MemoryStore};

    use crate::domain::menu::models::{CategoryUuid, MenuItemUuid};

    use super::*;

    fn latte() -> MenuItem {
        MenuItem {
            uuid: MenuItemUuid::new(),
            category_uuid: CategoryUuid::new(),
            name: "Latte".to_string(),
            description: None,
            image_url: None,
            base_price: Decimal::from(70),
            is_available: true,
        }
    }

    fn addon(name: &str, price: i64) -> Addon {
        Addon {
            uuid: AddonUuid::new(),
            name: name.to_string(),
            price: Decimal::from(price),
        }
    }

    #[test]
    fn preview_matches_the_cart_line_total() {
        let item = latte();
        let (shot, oat) = (addon("Extra shot", 10), addon("Oat milk", 15));
        let catalogue = [shot.clone(), oat.clone()];

        let mut customisation = Customisation::new(&item, &catalogue);
        customisation.toggle_addon(oat.uuid);
        customisation.toggle_addon(shot.uuid);
        customisation.set_quantity(2);

        assert_eq!(customisation.preview_total(), Decimal::from(190));

        let mut cart = CartStore::open(MemoryStore::new());
        cart.add_item(customisation.to_line_item());

        assert_eq!(cart.total_amount(), customisation.preview_total());
    }

    #[test]
    fn addons_follow_catalogue_order() {
        let item = latte();
        let (shot, oat) = (addon("Extra shot", 10), addon("Oat milk", 15));
        let catalogue = [shot.clone(), oat.clone()];

        let mut customisation = Customisation::new(&item, &catalogue);
        customisation.toggle_addon(oat.uuid);
        customisation.toggle_addon(shot.uuid);

        let names: Vec<String> = customisation
            .addons()
            .into_iter()
            .map(|addon| addon.name)
            .collect();

        assert_eq!(names, ["Extra shot", "Oat milk"]);
    }

    #[test]
    fn toggling_twice_deselects() {
        let item = latte();
        let shot = addon("Extra shot", 10);
        let catalogue = [shot.clone()];

        let mut customisation = Customisation::new(&item, &catalogue);
        customisation.toggle_addon(shot.uuid);
        customisation.toggle_addon(shot.uuid);

        assert!(!customisation.is_selected(shot.uuid));
        assert_eq!(customisation.preview_total(), Decimal::from(70));
    }

    #[test]
    fn unknown_addons_are_ignored() {
        let item = latte();
        let catalogue = [addon("Extra shot", 10)];

        let mut customisation = Customisation::new(&item, &catalogue);
        customisation.toggle_addon(AddonUuid::new());

        assert!(customisation.addons().is_empty());
    }

    #[test]
    fn quantity_never_drops_below_one() {
        let item = latte();

        let mut customisation = Customisation::new(&item, &[]);
        customisation.decrement();
        customisation.set_quantity(0);

        assert_eq!(customisation.quantity(), 1);

        customisation.increment();

        assert_eq!(customisation.quantity(), 2);
    }

    #[test]
    fn blank_notes_become_absent() {
        let item = latte();

        let mut customisation = Customisation::new(&item, &[]);
        customisation.set_notes("   ");

        assert_eq!(customisation.to_line_item().notes, None);

        customisation.set_notes("  less ice ");

        assert_eq!(
            customisation.to_line_item().notes.as_deref(),
            Some("less ice")
        );
    }
}
