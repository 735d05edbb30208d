//! Table rows as exchanged with the backend.

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    menu::models::{
        Addon, AddonUuid, Category, CategoryUuid, MenuItem, MenuItemDraft, MenuItemUuid,
    },
    orders::models::{
        NewOrder, NewOrderItem, NewOrderItemAddon, Order, OrderItem, OrderItemAddon,
        OrderItemUuid, OrderStatus, OrderType, OrderUuid, PaymentMethod,
    },
};

pub(super) const CATEGORIES: &str = "categories";
pub(super) const MENU_ITEMS: &str = "menu_items";
pub(super) const ADDONS: &str = "addons";
pub(super) const ORDERS: &str = "orders";
pub(super) const ORDER_ITEMS: &str = "order_items";
pub(super) const ORDER_ITEM_ADDONS: &str = "order_item_addons";

/// Orders with their items, add-ons and the names of what was ordered.
pub(super) const ORDER_WITH_ITEMS: &str =
    "*,order_items(*,menu_items(name),order_item_addons(*,addons(name)))";

#[derive(Debug, Deserialize)]
pub(super) struct NameRow {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CategoryRow {
    pub id: CategoryUuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            uuid: row.id,
            name: row.name,
            slug: row.slug,
            description: row.description,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct MenuItemRow {
    pub id: MenuItemUuid,
    pub category_id: CategoryUuid,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub base_price: Decimal,
    pub is_available: bool,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            uuid: row.id,
            category_uuid: row.category_id,
            name: row.name,
            description: row.description,
            image_url: row.image_url,
            base_price: row.base_price,
            is_available: row.is_available,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct MenuItemBody<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub base_price: Decimal,
    pub category_id: CategoryUuid,
    pub image_url: Option<&'a str>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl<'a> MenuItemBody<'a> {
    pub fn new(draft: &'a MenuItemDraft, is_available: Option<bool>) -> Self {
        Self {
            name: &draft.name,
            description: draft.description.as_deref(),
            base_price: draft.base_price,
            category_id: draft.category_uuid,
            image_url: draft.image_url.as_deref(),
            is_available,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct AvailabilityPatch {
    pub is_available: bool,
}

#[derive(Debug, Deserialize)]
pub(super) struct AddonRow {
    pub id: AddonUuid,
    pub name: String,
    pub price: Decimal,
}

impl From<AddonRow> for Addon {
    fn from(row: AddonRow) -> Self {
        Self {
            uuid: row.id,
            name: row.name,
            price: row.price,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct OrderRow {
    pub id: OrderUuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub created_at: Timestamp,

    #[serde(default)]
    pub order_items: Vec<OrderItemRow>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            uuid: row.id,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            order_type: row.order_type,
            payment_method: row.payment_method,
            status: row.status,
            total_amount: row.total_amount,
            items: row.order_items.into_iter().map(Into::into).collect(),
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct OrderItemRow {
    pub id: OrderItemUuid,
    pub menu_item_id: MenuItemUuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub notes: Option<String>,
    pub menu_items: Option<NameRow>,

    #[serde(default)]
    pub order_item_addons: Vec<OrderItemAddonRow>,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            uuid: row.id,
            menu_item_uuid: row.menu_item_id,
            name: row.menu_items.map(|menu_item| menu_item.name),
            quantity: row.quantity,
            unit_price: row.unit_price,
            subtotal: row.subtotal,
            notes: row.notes,
            addons: row.order_item_addons.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct OrderItemAddonRow {
    pub addon_id: AddonUuid,
    pub quantity: u32,
    pub price: Decimal,
    pub addons: Option<NameRow>,
}

impl From<OrderItemAddonRow> for OrderItemAddon {
    fn from(row: OrderItemAddonRow) -> Self {
        Self {
            addon_uuid: row.addon_id,
            name: row.addons.map(|addon| addon.name),
            quantity: row.quantity,
            price: row.price,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewOrderBody<'a> {
    pub customer_name: &'a str,
    pub customer_phone: &'a str,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub total_amount: Decimal,
}

impl<'a> From<&'a NewOrder> for NewOrderBody<'a> {
    fn from(order: &'a NewOrder) -> Self {
        Self {
            customer_name: &order.customer_name,
            customer_phone: &order.customer_phone,
            order_type: order.order_type,
            payment_method: order.payment_method,
            status: OrderStatus::Pending,
            total_amount: order.total_amount,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewOrderItemBody<'a> {
    pub order_id: OrderUuid,
    pub menu_item_id: MenuItemUuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub notes: Option<&'a str>,
}

impl<'a> NewOrderItemBody<'a> {
    pub fn new(order: OrderUuid, item: &'a NewOrderItem) -> Self {
        Self {
            order_id: order,
            menu_item_id: item.menu_item_uuid,
            quantity: item.quantity,
            unit_price: item.unit_price,
            subtotal: item.subtotal,
            notes: item.notes.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct NewOrderItemAddonBody {
    pub order_item_id: OrderItemUuid,
    pub addon_id: AddonUuid,
    pub quantity: u32,
    pub price: Decimal,
}

impl NewOrderItemAddonBody {
    pub fn new(item: OrderItemUuid, addon: &NewOrderItemAddon) -> Self {
        Self {
            order_item_id: item,
            addon_id: addon.addon_uuid,
            quantity: addon.quantity,
            price: addon.price,
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct StatusPatch {
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn order_rows_decode_embedded_items_and_numeric_prices() -> TestResult {
        let raw = r#"{
            "id": "01931c39-4b1e-7000-8000-000000000001",
            "customer_name": "Maria",
            "customer_phone": "09171234567",
            "order_type": "dine-in",
            "payment_method": "gcash",
            "status": "preparing",
            "total_amount": 160.00,
            "created_at": "2026-03-02T08:15:00.123456+00:00",
            "order_items": [{
                "id": "01931c39-4b1e-7000-8000-000000000002",
                "order_id": "01931c39-4b1e-7000-8000-000000000001",
                "menu_item_id": "01931c39-4b1e-7000-8000-000000000003",
                "quantity": 2,
                "unit_price": 70,
                "subtotal": 140,
                "notes": null,
                "menu_items": {"name": "Latte"},
                "order_item_addons": [{
                    "addon_id": "01931c39-4b1e-7000-8000-000000000004",
                    "quantity": 1,
                    "price": 10,
                    "addons": {"name": "Extra shot"}
                }]
            }]
        }"#;

        let order = Order::from(serde_json::from_str::<OrderRow>(raw)?);

        assert_eq!(order.order_type, OrderType::DineIn);
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.total_amount, Decimal::from(160));

        let [item] = order.items.as_slice() else {
            return Err("expected one item".into());
        };

        assert_eq!(item.name.as_deref(), Some("Latte"));
        assert_eq!(
            item.addons.first().and_then(|addon| addon.name.as_deref()),
            Some("Extra shot")
        );

        Ok(())
    }

    #[test]
    fn new_orders_are_written_as_pending() -> TestResult {
        let order = NewOrder {
            customer_name: "Maria".to_string(),
            customer_phone: "0917".to_string(),
            order_type: OrderType::Takeout,
            payment_method: PaymentMethod::Cash,
            total_amount: Decimal::from(80),
            items: Vec::new(),
        };

        let body = serde_json::to_value(NewOrderBody::from(&order))?;

        assert_eq!(body["status"], "pending");
        assert_eq!(body["order_type"], "takeout");

        Ok(())
    }
}
