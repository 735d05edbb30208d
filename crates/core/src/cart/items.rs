//! Cart line items

use std::fmt::{Display, Formatter, Result as FmtResult};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

use crate::pricing;

/// Add-ons selected for a single line item.
pub type Addons = SmallVec<[CartAddon; 4]>;

/// Locally generated identifier of a line item.
///
/// Distinct from the catalogue id: the same product customised twice yields two
/// line items with different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineItemId(String);

impl LineItemId {
    /// Generates a fresh id for a line item of the given catalogue product.
    ///
    /// The suffix is a v7 UUID, so ids sort by creation time and stay distinct
    /// across rapid successive calls.
    pub fn generate(menu_item_id: &str) -> Self {
        Self(format!("{menu_item_id}-{}", Uuid::now_v7()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LineItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<&str> for LineItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for LineItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A paid customisation attached to a line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartAddon {
    /// Catalogue add-on id
    pub id: String,

    /// Display name
    pub name: String,

    /// Unit price
    pub price: Decimal,

    /// How many times the add-on was applied to one unit of the line item
    pub quantity: u32,
}

impl CartAddon {
    /// Creates a single add-on selection.
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity: 1,
        }
    }

    /// `price × quantity`, saturating at the bounds of [`Decimal`]
    pub fn total(&self) -> Decimal {
        self.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// A customised product waiting to be added to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLineItem {
    /// Catalogue product id
    pub menu_item_id: String,

    /// Display name
    pub name: String,

    /// Image reference
    pub image: String,

    /// Unit price before add-ons
    pub base_price: Decimal,

    /// Number of units
    pub quantity: u32,

    /// Selected add-ons, in selection order
    pub addons: Addons,

    /// Free-text instructions
    pub notes: Option<String>,
}

impl NewLineItem {
    /// Price of the line as it would appear in the cart.
    pub fn line_total(&self) -> Decimal {
        pricing::line_total(self.base_price, &self.addons, self.quantity)
    }

    pub(crate) fn into_line_item(self, id: LineItemId) -> CartLineItem {
        CartLineItem {
            id,
            menu_item_id: self.menu_item_id,
            name: self.name,
            image: self.image,
            base_price: self.base_price,
            quantity: self.quantity.max(1),
            addons: self.addons,
            notes: self.notes,
        }
    }
}

/// One customised product instance in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    /// Line item id
    pub id: LineItemId,

    /// Catalogue product id
    pub menu_item_id: String,

    /// Display name
    pub name: String,

    /// Image reference
    #[serde(default)]
    pub image: String,

    /// Unit price before add-ons
    pub base_price: Decimal,

    /// Number of units, never below one while the item is in a cart
    pub quantity: u32,

    /// Selected add-ons, in selection order
    #[serde(default)]
    pub addons: Addons,

    /// Free-text instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CartLineItem {
    /// Price of one unit including its add-ons.
    pub fn unit_total(&self) -> Decimal {
        pricing::unit_total(self.base_price, &self.addons)
    }

    /// Price of the whole line.
    pub fn line_total(&self) -> Decimal {
        pricing::line_total(self.base_price, &self.addons, self.quantity)
    }
}
