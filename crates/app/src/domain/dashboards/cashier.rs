//! Cashier dashboard: the queue of orders waiting to be accepted.

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

pub const CASHIER_FAST_INTERVAL: Duration = Duration::from_millis(3_000);
pub const CASHIER_SLOW_INTERVAL: Duration = Duration::from_millis(10_000);

pub struct CashierDashboard {
    orders: Arc<dyn OrdersService>,
    options: PollOptions,
}

impl CashierDashboard {
    pub fn new(orders: Arc<dyn OrdersService>) -> Self {
        Self::with_options(
            orders,
            PollOptions::with_intervals(CASHIER_FAST_INTERVAL, CASHIER_SLOW_INTERVAL),
        )
    }

    /// Uses `options` for its intervals and overlap policy.
    pub fn with_options(orders: Arc<dyn OrdersService>, options: PollOptions) -> Self {
        Self { orders, options }
    }

    /// Accepts a pending order and passes it to the baristas.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be updated.
    pub async fn accept(&self, uuid: OrderUuid) -> Result<Order, OrdersServiceError> {
        let order = self.orders.set_status(uuid, OrderStatus::Accepted).await?;

        info!(order = %uuid, number = order.number(), "order accepted");

        Ok(order)
    }

    /// Rejects a pending order, cancelling it.
    ///
    /// # Errors
    ///
    /// Returns an error if the order cannot be updated.
    pub async fn reject(&self, uuid: OrderUuid) -> Result<Order, OrdersServiceError> {
        let order = self.orders.set_status(uuid, OrderStatus::Cancelled).await?;

        info!(order = %uuid, number = order.number(), "order rejected");

        Ok(order)
    }
}

impl Debug for CashierDashboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CashierDashboard")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Dashboard for CashierDashboard {
    /// Pending orders, oldest first.
    type View = Vec<Order>;
    type Error = OrdersServiceError;

    fn name(&self) -> &'static str {
        "cashier"
    }

    async fn load(&self) -> Result<Vec<Order>, OrdersServiceError> {
        self.orders.list_by_status(vec![OrderStatus::Pending]).await
    }

    fn poll_options(&self, view: Option<&Vec<Order>>) -> PollOptions {
        self.options
            .clone()
            .enabled(true)
            .has_activity(view.is_some_and(|pending| !pending.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::orders::MockOrdersService, test::fixtures::make_order};

    use super::*;

    #[tokio::test]
    async fn test_load_lists_pending_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_by_status()
            .once()
            .withf(|statuses| statuses.as_slice() == [OrderStatus::Pending])
            .returning(|_| Ok(vec![make_order(OrderStatus::Pending)]));

        let cashier = CashierDashboard::new(Arc::new(orders));

        assert_eq!(cashier.load().await?.len(), 1);

        Ok(())
    }

    #[test]
    fn polls_fast_only_while_orders_are_waiting() {
        let cashier = CashierDashboard::new(Arc::new(MockOrdersService::new()));

        let empty = cashier.poll_options(Some(&Vec::new()));
        let waiting = cashier.poll_options(Some(&vec![make_order(OrderStatus::Pending)]));

        assert!(!cashier.poll_options(None).has_activity);
        assert!(!empty.has_activity);
        assert!(waiting.has_activity);
        assert_eq!(waiting.active_interval(), CASHIER_FAST_INTERVAL);
        assert_eq!(empty.active_interval(), CASHIER_SLOW_INTERVAL);
    }

    #[tokio::test]
    async fn test_accept_and_reject_set_the_status() -> TestResult {
        let mut orders = MockOrdersService::new();
        let accepted = OrderUuid::new();
        let rejected = OrderUuid::new();

        orders
            .expect_set_status()
            .once()
            .withf(move |uuid, status| *uuid == accepted && *status == OrderStatus::Accepted)
            .returning(|_, status| Ok(make_order(status)));

        orders
            .expect_set_status()
            .once()
            .withf(move |uuid, status| *uuid == rejected && *status == OrderStatus::Cancelled)
            .returning(|_, status| Ok(make_order(status)));

        let cashier = CashierDashboard::new(Arc::new(orders));

        assert_eq!(cashier.accept(accepted).await?.status, OrderStatus::Accepted);
        assert_eq!(cashier.reject(rejected).await?.status, OrderStatus::Cancelled);

        Ok(())
    }
}
