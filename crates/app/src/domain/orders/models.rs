//! Order Models

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        menu::models::{AddonUuid, MenuItemUuid},
        orders::order_number,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<Order>;

/// Order Item UUID
pub type OrderItemUuid = TypedUuid<OrderItem>;

/// Where an order is in the kitchen workflow.
///
/// Orders move forward through [`OrderStatus::PROGRESSION`]. A cashier may
/// reject a pending order instead, which cancels it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    Ready,
    Served,
    Cancelled,
}

impl OrderStatus {
    /// The happy path, in order.
    pub const PROGRESSION: [Self; 5] = [
        Self::Pending,
        Self::Accepted,
        Self::Preparing,
        Self::Ready,
        Self::Served,
    ];

    /// Statuses that count towards sales.
    pub const SALES: [Self; 3] = [Self::Preparing, Self::Ready, Self::Served];

    /// Statuses removed by a purge.
    pub const CLOSED: [Self; 2] = [Self::Served, Self::Cancelled];

    /// Position on the tracking page's progress bar. Cancelled orders have none.
    pub fn step_index(self) -> Option<usize> {
        Self::PROGRESSION.iter().position(|status| *status == self)
    }

    /// Whether the order has left the workflow.
    pub fn is_closed(self) -> bool {
        Self::CLOSED.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Served => "served",
            Self::Cancelled => "cancelled",
        }
    }

    /// Customer-facing label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Order Received",
            Self::Accepted => "Accepted",
            Self::Preparing => "Preparing",
            Self::Ready => "Ready for Pickup",
            Self::Served => "Served",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status {0:?}")]
pub struct UnknownOrderStatus(String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::Cancelled]
            .into_iter()
            .chain(Self::PROGRESSION)
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownOrderStatus(value.to_string()))
    }
}

/// How the order leaves the counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    DineIn,
    Takeout,
}

impl OrderType {
    pub fn label(self) -> &'static str {
        match self {
            Self::DineIn => "Dine In",
            Self::Takeout => "Takeout",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Gcash,
}

impl PaymentMethod {
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Gcash => "GCash",
        }
    }
}

/// Order Model
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub total_amount: Decimal,
    pub items: Vec<OrderItem>,
    pub created_at: Timestamp,
}

impl Order {
    /// Six-digit number shown to customers and staff.
    pub fn number(&self) -> u32 {
        order_number(self.uuid)
    }
}

/// Order Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub uuid: OrderItemUuid,
    pub menu_item_uuid: MenuItemUuid,

    /// Menu item name, when the item still exists on the menu
    pub name: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub notes: Option<String>,
    pub addons: Vec<OrderItemAddon>,
}

/// Order Item Addon Model
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemAddon {
    pub addon_uuid: AddonUuid,
    pub name: Option<String>,
    pub quantity: u32,
    pub price: Decimal,
}

/// New Order Model
///
/// Orders are always created as [`OrderStatus::Pending`].
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_phone: String,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub total_amount: Decimal,
    pub items: Vec<NewOrderItem>,
}

/// New Order Item Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub menu_item_uuid: MenuItemUuid,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
    pub notes: Option<String>,
    pub addons: Vec<NewOrderItemAddon>,
}

// NewOrderItemAddon Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItemAddon {
    pub addon_uuid: AddonUuid,
    pub quantity: u32,
    pub price: Decimal,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn step_index_follows_the_progression() {
        let steps: Vec<Option<usize>> = OrderStatus::PROGRESSION
            .into_iter()
            .map(OrderStatus::step_index)
            .collect();

        assert_eq!(steps, [Some(0), Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(OrderStatus::Cancelled.step_index(), None);
    }

    #[test]
    fn only_served_and_cancelled_are_closed() {
        let closed: Vec<OrderStatus> = [OrderStatus::Cancelled]
            .into_iter()
            .chain(OrderStatus::PROGRESSION)
            .filter(|status| status.is_closed())
            .collect();

        assert_eq!(closed, [OrderStatus::Cancelled, OrderStatus::Served]);
    }

    #[test]
    fn status_parses_its_own_display() -> TestResult {
        for status in OrderStatus::PROGRESSION {
            assert_eq!(status.to_string().parse::<OrderStatus>()?, status);
        }

        assert_eq!("cancelled".parse::<OrderStatus>()?, OrderStatus::Cancelled);
        assert!("shipped".parse::<OrderStatus>().is_err());

        Ok(())
    }

    #[test]
    fn enums_use_the_backend_spelling() -> TestResult {
        assert_eq!(serde_json::to_string(&OrderType::DineIn)?, "\"dine-in\"");
        assert_eq!(serde_json::to_string(&PaymentMethod::Gcash)?, "\"gcash\"");
        assert_eq!(
            serde_json::from_str::<OrderStatus>("\"preparing\"")?,
            OrderStatus::Preparing
        );

        Ok(())
    }
}
