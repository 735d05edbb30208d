//! Barista dashboard: orders being made and orders waiting to be collected.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use brewdesk::poller::PollOptions;
use tracing::info;

use crate::domain::{
    dashboards::Dashboard,
    orders::{
        OrdersService, OrdersServiceError,
        models::{Order, OrderStatus, OrderUuid},
    },
};

pub const BARISTA_FAST_INTERVAL: Duration = Duration::from_millis(5_000);
pub const BARISTA_SLOW_INTERVAL: Duration = Duration::from_millis(10_000);

/// The two barista queues, each oldest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BaristaQueues {
    /// Accepted and preparing orders
    pub in_progress: Vec<Order>,

    /// Orders ready for pickup
    pub ready: Vec<Order>,
}

pub struct BaristaDashboard {
    orders: Arc<dyn OrdersService>,
    options: PollOptions,
}

impl BaristaDashboard {
    pub fn new(orders: Arc<dyn OrdersService>) -> Self {
        Self::with_options(
            orders,
            PollOptions::with_intervals(BARISTA_FAST_INTERVAL, BARISTA_SLOW_INTERVAL),
        )
    }

    pub fn with_options(orders: Arc<dyn OrdersService>, options: PollOptions) -> Self {
        Self { orders, options }
    }

    /// # Errors
    ///
    /// Returns an error if the order cannot be updated.
    pub async fn start_preparing(&self, uuid: OrderUuid) -> Result<Order, OrdersServiceError> {
        self.advance(uuid, OrderStatus::Preparing).await
    }

    /// # Errors
    ///
    /// Returns an error if the order cannot be updated.
    pub async fn mark_ready(&self, uuid: OrderUuid) -> Result<Order, OrdersServiceError> {
        self.advance(uuid, OrderStatus::Ready).await
    }

    /// # Errors
    ///
    /// Returns an error if the order cannot be updated.
    pub async fn mark_served(&self, uuid: OrderUuid) -> Result<Order, OrdersServiceError> {
        self.advance(uuid, OrderStatus::Served).await
    }

    async fn advance(
        &self,
        uuid: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let order = self.orders.set_status(uuid, status).await?;

        info!(order = %uuid, number = order.number(), %status, "order advanced");

        Ok(order)
    }
}

impl Debug for BaristaDashboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("BaristaDashboard")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Dashboard for BaristaDashboard {
    type View = BaristaQueues;
    type Error = OrdersServiceError;

    fn name(&self) -> &'static str {
        "barista"
    }

    async fn load(&self) -> Result<BaristaQueues, OrdersServiceError> {
        let in_progress = self
            .orders
            .list_by_status(vec![OrderStatus::Accepted, OrderStatus::Preparing])
            .await?;

        let ready = self
            .orders
            .list_by_status(vec![OrderStatus::Ready])
            .await?;

        Ok(BaristaQueues { in_progress, ready })
    }

    fn poll_options(&self, view: Option<&BaristaQueues>) -> PollOptions {
        self.options
            .clone()
            .enabled(true)
            .has_activity(view.is_some_and(|queues| !queues.in_progress.is_empty()))
    }
}
