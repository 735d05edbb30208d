//! Menu service.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::menu::{
    errors::MenuServiceError,
    models::{Addon, Category, CategoryUuid, MenuItem, MenuItemDraft, MenuItemUuid},
};

#[automock]
#[async_trait]
pub trait MenuService: Send + Sync {
    /// Retrieve every category, ordered by name.
    async fn list_categories(&self) -> Result<Vec<Category>, MenuServiceError>;

    /// Retrieve a single category by its URL slug.
    async fn category_by_slug(&self, slug: &str) -> Result<Category, MenuServiceError>;

    /// Retrieve the available items of a category, ordered by name.
    async fn available_items_in_category(
        &self,
        slug: &str,
    ) -> Result<Vec<MenuItem>, MenuServiceError>;

    /// Retrieve every item, available or not, ordered by name.
    async fn list_items(
        &self,
        category: Option<CategoryUuid>,
    ) -> Result<Vec<MenuItem>, MenuServiceError>;

    /// Retrieve every add-on, ordered by name.
    async fn list_addons(&self) -> Result<Vec<Addon>, MenuServiceError>;

    /// Create a new menu item. New items start out available.
    async fn create_item(&self, item: MenuItemDraft) -> Result<MenuItem, MenuServiceError>;

    /// Replace the details of an existing menu item.
    async fn update_item(
        &self,
        uuid: MenuItemUuid,
        item: MenuItemDraft,
    ) -> Result<MenuItem, MenuServiceError>;

    /// Show or hide an item on the customer menu.
    async fn set_item_availability(
        &self,
        uuid: MenuItemUuid,
        is_available: bool,
    ) -> Result<MenuItem, MenuServiceError>;

    /// Delete a menu item.
    async fn delete_item(&self, uuid: MenuItemUuid) -> Result<(), MenuServiceError>;
}
