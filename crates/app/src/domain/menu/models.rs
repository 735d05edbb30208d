//! Menu Models

use rust_decimal::Decimal;

use crate::{domain::menu::MenuServiceError, uuids::TypedUuid};

/// Category UUID
pub type CategoryUuid = TypedUuid<Category>;

/// Category Model
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub uuid: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// Menu Item UUID
pub type MenuItemUuid = TypedUuid<MenuItem>;

/// Menu Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub uuid: MenuItemUuid,
    pub category_uuid: CategoryUuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub base_price: Decimal,
    pub is_available: bool,
}

/// Addon UUID
pub type AddonUuid = TypedUuid<Addon>;

/// Addon Model
#[derive(Debug, Clone, PartialEq)]
pub struct Addon {
    pub uuid: AddonUuid,
    pub name: String,
    pub price: Decimal,
}

/// Menu item details as entered in the admin form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuItemForm {
    pub name: String,
    pub description: String,
    pub base_price: Option<Decimal>,
    pub category_uuid: Option<CategoryUuid>,
    pub image_url: String,
}

/// Validated menu item details, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItemDraft {
    pub name: String,
    pub description: Option<String>,
    pub base_price: Decimal,
    pub category_uuid: CategoryUuid,
    pub image_url: Option<String>,
}

impl MenuItemForm {
    /// Validates the form. Blank optional fields become `None`.
    ///
    /// # Errors
    ///
    /// - [`MenuServiceError::MissingRequiredData`]: name, price or category is missing.
    /// - [`MenuServiceError::InvalidPrice`]: the price is zero or negative.
    pub fn validate(self) -> Result<MenuItemDraft, MenuServiceError> {
        let name = self.name.trim();

        if name.is_empty() {
            return Err(MenuServiceError::MissingRequiredData("name"));
        }

        let base_price = self
            .base_price
            .ok_or(MenuServiceError::MissingRequiredData("base_price"))?;

        if base_price <= Decimal::ZERO {
            return Err(MenuServiceError::InvalidPrice);
        }

        let category_uuid = self
            .category_uuid
            .ok_or(MenuServiceError::MissingRequiredData("category"))?;

        Ok(MenuItemDraft {
            name: name.to_string(),
            description: non_blank(self.description),
            base_price,
            category_uuid,
            image_url: non_blank(self.image_url),
        })
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
