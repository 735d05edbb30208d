//! Orders service over REST.

use async_trait::async_trait;
use serde::de::IgnoredAny;
use tracing::debug;

use crate::domain::orders::{
    OrdersService, OrdersServiceError,
    models::{NewOrder, Order, OrderStatus, OrderUuid},
};

use super::{
    Direction, Query, RestBackend, RestError,
    rows::{
        NewOrderBody, NewOrderItemAddonBody, NewOrderItemBody, ORDER_ITEM_ADDONS, ORDER_ITEMS,
        ORDER_WITH_ITEMS, ORDERS, OrderItemRow, OrderRow, StatusPatch,
    },
};

fn first<T>(rows: Vec<T>) -> Result<T, RestError> {
    rows.into_iter()
        .next()
        .ok_or_else(|| RestError::UnexpectedResponse("no rows returned".to_string()))
}

#[async_trait]
impl OrdersService for RestBackend {
    /// Writes the order row, then each item row, then that item's add-on rows.
    /// A failure part-way leaves the rows written so far in place.
    async fn create_order(&self, order: NewOrder) -> Result<Order, OrdersServiceError> {
        let rows: Vec<OrderRow> = self.insert(ORDERS, &NewOrderBody::from(&order)).await?;
        let uuid = first(rows)?.id;

        for item in &order.items {
            let rows: Vec<OrderItemRow> = self
                .insert(ORDER_ITEMS, &NewOrderItemBody::new(uuid, item))
                .await?;

            let item_uuid = first(rows)?.id;

            if item.addons.is_empty() {
                continue;
            }

            let addons: Vec<NewOrderItemAddonBody> = item
                .addons
                .iter()
                .map(|addon| NewOrderItemAddonBody::new(item_uuid, addon))
                .collect();

            let _: Vec<IgnoredAny> = self.insert(ORDER_ITEM_ADDONS, &addons).await?;
        }

        debug!(order = %uuid, items = order.items.len(), "order rows written");

        self.get_order(uuid).await
    }

    async fn get_order(&self, uuid: OrderUuid) -> Result<Order, OrdersServiceError> {
        let query = Query::new().select(ORDER_WITH_ITEMS).eq("id", uuid);

        let rows: Vec<OrderRow> = self.select(ORDERS, &query).await?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn list_by_status(
        &self,
        statuses: Vec<OrderStatus>,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let query = Query::new()
            .select(ORDER_WITH_ITEMS)
            .in_list("status", statuses)
            .order("created_at", Direction::Asc);

        let rows: Vec<OrderRow> = self.select(ORDERS, &query).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Order>, OrdersServiceError> {
        let query = Query::new()
            .select(ORDER_WITH_ITEMS)
            .order("created_at", Direction::Desc)
            .limit(limit);

        let rows: Vec<OrderRow> = self.select(ORDERS, &query).await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn set_status(
        &self,
        uuid: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let query = Query::new().select(ORDER_WITH_ITEMS).eq("id", uuid);

        let rows: Vec<OrderRow> = self
            .update(ORDERS, &query, &StatusPatch { status })
            .await?;

        rows.into_iter()
            .next()
            .map(Into::into)
            .ok_or(OrdersServiceError::NotFound)
    }

    async fn purge_closed(&self) -> Result<u64, OrdersServiceError> {
        let query = Query::new()
            .select("id")
            .in_list("status", OrderStatus::CLOSED);

        let rows: Vec<IgnoredAny> = self.delete(ORDERS, &query).await?;

        Ok(u64::try_from(rows.len()).unwrap_or(u64::MAX))
    }
}
