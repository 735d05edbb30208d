//! Customer order tracking.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use brewdesk::poller::PollOptions;

use crate::domain::{
    dashboards::Dashboard,
    orders::{
        OrdersService, OrdersServiceError,
        models::{Order, OrderUuid},
    },
};

pub const TRACKER_FAST_INTERVAL: Duration = Duration::from_millis(5_000);
pub const TRACKER_SLOW_INTERVAL: Duration = Duration::from_millis(10_000);

/// Result of looking an order up.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackedOrder {
    Found(Order),
    NotFound,
}

impl TrackedOrder {
    pub fn order(&self) -> Option<&Order> {
        match self {
            Self::Found(order) => Some(order),
            Self::NotFound => None,
        }
    }
}

/// Follows a single order until it is served or cancelled.
pub struct OrderTracker {
    orders: Arc<dyn OrdersService>,
    uuid: OrderUuid,
    options: PollOptions,
}

impl OrderTracker {
    pub fn new(orders: Arc<dyn OrdersService>, uuid: OrderUuid) -> Self {
        Self::with_options(
            orders,
            uuid,
            PollOptions::with_intervals(TRACKER_FAST_INTERVAL, TRACKER_SLOW_INTERVAL),
        )
    }

    pub fn with_options(
        orders: Arc<dyn OrdersService>,
        uuid: OrderUuid,
        options: PollOptions,
    ) -> Self {
        Self {
            orders,
            uuid,
            options,
        }
    }

    pub fn uuid(&self) -> OrderUuid {
        self.uuid
    }
}

impl Debug for OrderTracker {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("OrderTracker")
            .field("uuid", &self.uuid)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Dashboard for OrderTracker {
    type View = TrackedOrder;
    type Error = OrdersServiceError;

    fn name(&self) -> &'static str {
        "tracker"
    }

    async fn load(&self) -> Result<TrackedOrder, OrdersServiceError> {
        match self.orders.get_order(self.uuid).await {
            Ok(order) => Ok(TrackedOrder::Found(order)),
            Err(OrdersServiceError::NotFound) => Ok(TrackedOrder::NotFound),
            Err(error) => Err(error),
        }
    }

    /// Polls only while the order is known and still open.
    fn poll_options(&self, view: Option<&TrackedOrder>) -> PollOptions {
        let open = view
            .and_then(TrackedOrder::order)
            .is_some_and(|order| !order.status.is_closed());

        self.options.clone().enabled(open).has_activity(false)
    }
}
