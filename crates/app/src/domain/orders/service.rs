//! Orders service.

use async_trait::async_trait;
use mockall::automock;

use crate::domain::orders::{
    errors::OrdersServiceError,
    models::{NewOrder, Order, OrderStatus, OrderUuid},
};

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Submit a new order with its items and their add-ons.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError>;

    /// Retrieve a single order.
    async fn get_order(&self, uuid: OrderUuid) -> Result<Order, OrdersServiceError>;

    /// Retrieve orders in any of the given statuses, oldest first.
    async fn list_by_status(
        &self,
        statuses: Vec<OrderStatus>,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    /// Retrieve the most recent orders, newest first.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Order>, OrdersServiceError>;

    /// Move an order to a new status.
    async fn set_status(
        &self,
        uuid: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Delete every served and cancelled order, returning how many went.
    async fn purge_closed(&self) -> Result<u64, OrdersServiceError>;
}
