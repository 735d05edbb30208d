//! Menu service over REST.

use async_trait::async_trait;

use crate::domain::menu::{
    MenuService, MenuServiceError,
    models::{Addon, Category, CategoryUuid, MenuItem, MenuItemDraft, MenuItemUuid},
};

use super::{
    Direction, Query, RestBackend,
    rows::{
        ADDONS, AddonRow, AvailabilityPatch, CATEGORIES, CategoryRow, MENU_ITEMS, MenuItemBody,
        MenuItemRow,
    },
};

fn by_name() -> Query {
    Query::new().select("*").order("name", Direction::Asc)
}

fn single<R, T>(rows: Vec<R>) -> Result<T, MenuServiceError>
where
    R: Into<T>,
{
    rows.into_iter()
        .next()
        .map(Into::into)
        .ok_or(MenuServiceError::NotFound)
}

#[async_trait]
impl MenuService for RestBackend {
    async fn list_categories(&self) -> Result<Vec<Category>, MenuServiceError> {
        let rows: Vec<CategoryRow> = self.select(CATEGORIES, &by_name()).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn category_by_slug(&self, slug: &str) -> Result<Category, MenuServiceError> {
        let query = Query::new().select("*").eq("slug", slug).limit(1);

        let rows: Vec<CategoryRow> = self.select(CATEGORIES, &query).await?;

        single(rows)
    }

    async fn available_items_in_category(
        &self,
        slug: &str,
    ) -> Result<Vec<MenuItem>, MenuServiceError> {
        let query = Query::new()
            .select("*,categories!inner(slug)")
            .eq("categories.slug", slug)
            .eq("is_available", true)
            .order("name", Direction::Asc);

        let rows: Vec<MenuItemRow> = self.select(MENU_ITEMS, &query).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_items(
        &self,
        category: Option<CategoryUuid>,
    ) -> Result<Vec<MenuItem>, MenuServiceError> {
        let query = match category {
            Some(category) => by_name().eq("category_id", category),
            None => by_name(),
        };

        let rows: Vec<MenuItemRow> = self.select(MENU_ITEMS, &query).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_addons(&self) -> Result<Vec<Addon>, MenuServiceError> {
        let rows: Vec<AddonRow> = self.select(ADDONS, &by_name()).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_item(&self, item: MenuItemDraft) -> Result<MenuItem, MenuServiceError> {
        let rows: Vec<MenuItemRow> = self
            .insert(MENU_ITEMS, &MenuItemBody::new(&item, Some(true)))
            .await?;

        single(rows)
    }

    async fn update_item(
        &self,
        uuid: MenuItemUuid,
        item: MenuItemDraft,
    ) -> Result<MenuItem, MenuServiceError> {
        let rows: Vec<MenuItemRow> = self
            .update(
                MENU_ITEMS,
                &Query::new().eq("id", uuid),
                &MenuItemBody::new(&item, None),
            )
            .await?;

        single(rows)
    }

    async fn set_item_availability(
        &self,
        uuid: MenuItemUuid,
        is_available: bool,
    ) -> Result<MenuItem, MenuServiceError> {
        let rows: Vec<MenuItemRow> = self
            .update(
                MENU_ITEMS,
                &Query::new().eq("id", uuid),
                &AvailabilityPatch { is_available },
            )
            .await?;

        single(rows)
    }

    async fn delete_item(&self, uuid: MenuItemUuid) -> Result<(), MenuServiceError> {
        let rows: Vec<MenuItemRow> = self
            .delete(MENU_ITEMS, &Query::new().eq("id", uuid))
            .await?;

        if rows.is_empty() {
            return Err(MenuServiceError::NotFound);
        }

        Ok(())
    }
}
