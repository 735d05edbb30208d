//! In-process backend.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::{
    menu::{
        MenuService, MenuServiceError,
        models::{Addon, Category, CategoryUuid, MenuItem, MenuItemDraft, MenuItemUuid},
    },
    orders::{
        OrdersService, OrdersServiceError,
        models::{
            NewOrder, Order, OrderItem, OrderItemAddon, OrderItemUuid, OrderStatus, OrderUuid,
        },
    },
};

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    items: Vec<MenuItem>,
    addons: Vec<Addon>,

    /// In creation order
    orders: Vec<Order>,
}

/// Menu and orders services held in memory. Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend holding the given menu and no orders.
    #[must_use]
    pub fn with_menu(categories: Vec<Category>, items: Vec<MenuItem>, addons: Vec<Addon>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables {
                categories,
                items,
                addons,
                orders: Vec::new(),
            })),
        }
    }
}

fn sorted_by_name<T>(rows: impl Iterator<Item = T>, name: impl Fn(&T) -> &str) -> Vec<T> {
    let mut rows: Vec<T> = rows.collect();

    rows.sort_by(|a, b| name(a).cmp(name(b)));

    rows
}

#[async_trait]
impl MenuService for MemoryBackend {
    async fn list_categories(&self) -> Result<Vec<Category>, MenuServiceError> {
        let tables = self.tables.read().await;

        Ok(sorted_by_name(tables.categories.iter().cloned(), |category| {
            category.name.as_str()
        }))
    }

    async fn category_by_slug(&self, slug: &str) -> Result<Category, MenuServiceError> {
        let tables = self.tables.read().await;

        tables
            .categories
            .iter()
            .find(|category| category.slug == slug)
            .cloned()
            .ok_or(MenuServiceError::NotFound)
    }

    async fn available_items_in_category(
        &self,
        slug: &str,
    ) -> Result<Vec<MenuItem>, MenuServiceError> {
        let tables = self.tables.read().await;

        let Some(category) = tables.categories.iter().find(|category| category.slug == slug)
        else {
            return Ok(Vec::new());
        };

        Ok(sorted_by_name(
            tables
                .items
                .iter()
                .filter(|item| item.category_uuid == category.uuid && item.is_available)
                .cloned(),
            |item| item.name.as_str(),
        ))
    }

    async fn list_items(
        &self,
        category: Option<CategoryUuid>,
    ) -> Result<Vec<MenuItem>, MenuServiceError> {
        let tables = self.tables.read().await;

        Ok(sorted_by_name(
            tables
                .items
                .iter()
                .filter(|item| category.is_none_or(|category| item.category_uuid == category))
                .cloned(),
            |item| item.name.as_str(),
        ))
    }

    async fn list_addons(&self) -> Result<Vec<Addon>, MenuServiceError> {
        let tables = self.tables.read().await;

        Ok(sorted_by_name(tables.addons.iter().cloned(), |addon| {
            addon.name.as_str()
        }))
    }

    async fn create_item(&self, item: MenuItemDraft) -> Result<MenuItem, MenuServiceError> {
        let mut tables = self.tables.write().await;

        ensure_category(&tables, item.category_uuid)?;

        let created = MenuItem {
            uuid: MenuItemUuid::new(),
            category_uuid: item.category_uuid,
            name: item.name,
            description: item.description,
            image_url: item.image_url,
            base_price: item.base_price,
            is_available: true,
        };

        tables.items.push(created.clone());

        Ok(created)
    }

    async fn update_item(
        &self,
        uuid: MenuItemUuid,
        item: MenuItemDraft,
    ) -> Result<MenuItem, MenuServiceError> {
        let mut tables = self.tables.write().await;

        ensure_category(&tables, item.category_uuid)?;

        let existing = tables
            .items
            .iter_mut()
            .find(|existing| existing.uuid == uuid)
            .ok_or(MenuServiceError::NotFound)?;

        existing.category_uuid = item.category_uuid;
        existing.name = item.name;
        existing.description = item.description;
        existing.image_url = item.image_url;
        existing.base_price = item.base_price;

        Ok(existing.clone())
    }

    async fn set_item_availability(
        &self,
        uuid: MenuItemUuid,
        is_available: bool,
    ) -> Result<MenuItem, MenuServiceError> {
        let mut tables = self.tables.write().await;

        let existing = tables
            .items
            .iter_mut()
            .find(|existing| existing.uuid == uuid)
            .ok_or(MenuServiceError::NotFound)?;

        existing.is_available = is_available;

        Ok(existing.clone())
    }

    async fn delete_item(&self, uuid: MenuItemUuid) -> Result<(), MenuServiceError> {
        let mut tables = self.tables.write().await;
        let before = tables.items.len();

        tables.items.retain(|item| item.uuid != uuid);

        if tables.items.len() == before {
            return Err(MenuServiceError::NotFound);
        }

        Ok(())
    }
}

fn ensure_category(tables: &Tables, category: CategoryUuid) -> Result<(), MenuServiceError> {
    if tables.categories.iter().any(|existing| existing.uuid == category) {
        Ok(())
    } else {
        Err(MenuServiceError::InvalidReference)
    }
}

#[async_trait]
impl OrdersService for MemoryBackend {
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let mut tables = self.tables.write().await;

        let items = order
            .items
            .into_iter()
            .map(|item| {
                let menu_item = tables
                    .items
                    .iter()
                    .find(|menu_item| menu_item.uuid == item.menu_item_uuid)
                    .ok_or(OrdersServiceError::InvalidReference)?;

                let addons = item
                    .addons
                    .into_iter()
                    .map(|addon| {
                        let known = tables
                            .addons
                            .iter()
                            .find(|known| known.uuid == addon.addon_uuid)
                            .ok_or(OrdersServiceError::InvalidReference)?;

                        Ok(OrderItemAddon {
                            addon_uuid: addon.addon_uuid,
                            name: Some(known.name.clone()),
                            quantity: addon.quantity,
                            price: addon.price,
                        })
                    })
                    .collect::<Result<Vec<_>, OrdersServiceError>>()?;

                Ok(OrderItem {
                    uuid: OrderItemUuid::new(),
                    menu_item_uuid: item.menu_item_uuid,
                    name: Some(menu_item.name.clone()),
                    quantity: item.quantity,
                    unit_price: item.unit_price,
                    subtotal: item.subtotal,
                    notes: item.notes,
                    addons,
                })
            })
            .collect::<Result<Vec<_>, OrdersServiceError>>()?;

        let created = Order {
            uuid: OrderUuid::new(),
            customer_name: order.customer_name,
            customer_phone: order.customer_phone,
            order_type: order.order_type,
            payment_method: order.payment_method,
            status: OrderStatus::Pending,
            total_amount: order.total_amount,
            items,
            created_at: Timestamp::now(),
        };

        debug!(order = %created.uuid, "order stored in memory");

        tables.orders.push(created.clone());

        Ok(created)
    }

    async fn get_order(&self, uuid: OrderUuid) -> Result<Order, OrdersServiceError> {
        let tables = self.tables.read().await;

        tables
            .orders
            .iter()
            .find(|order| order.uuid == uuid)
            .cloned()
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn list_by_status(
        &self,
        statuses: Vec<OrderStatus>,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let tables = self.tables.read().await;

        Ok(tables
            .orders
            .iter()
            .filter(|order| statuses.contains(&order.status))
            .cloned()
            .collect())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Order>, OrdersServiceError> {
        let tables = self.tables.read().await;

        Ok(tables.orders.iter().rev().take(limit).cloned().collect())
    }

    async fn set_status(
        &self,
        uuid: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tables = self.tables.write().await;

        let order = tables
            .orders
            .iter_mut()
            .find(|order| order.uuid == uuid)
            .ok_or(OrdersServiceError::NotFound)?;

        order.status = status;

        Ok(order.clone())
    }

    async fn purge_closed(&self) -> Result<u64, OrdersServiceError> {
        let mut tables = self.tables.write().await;
        let before = tables.orders.len();

        tables.orders.retain(|order| !order.status.is_closed());

        Ok(u64::try_from(before - tables.orders.len()).unwrap_or(u64::MAX))
    }
}
