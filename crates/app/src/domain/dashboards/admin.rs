//! Admin dashboard: sales figures, recent transactions and menu management.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
    time::Duration,
};

use async_trait::async_trait;
use brewdesk::poller::PollOptions;
use jiff::{Timestamp, civil::Date, tz::TimeZone};
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use crate::domain::{
    dashboards::Dashboard,
    menu::{
        MenuService, MenuServiceError,
        models::{Category, MenuItem, MenuItemForm, MenuItemUuid},
    },
    orders::{
        OrdersService, OrdersServiceError,
        models::{Order, OrderStatus},
    },
};

pub const ADMIN_FAST_INTERVAL: Duration = Duration::from_millis(10_000);
pub const ADMIN_SLOW_INTERVAL: Duration = Duration::from_millis(30_000);

/// Number of orders listed under recent transactions.
pub const RECENT_ORDERS: usize = 100;

#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Orders(#[from] OrdersServiceError),

    #[error(transparent)]
    Menu(#[from] MenuServiceError),
}

/// Sales over orders that have been accepted into the kitchen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SalesStats {
    pub total_sales: Decimal,
    pub total_orders: usize,
    pub today_sales: Decimal,
}

impl SalesStats {
    /// Sums `orders`, counting an order towards today when its creation falls
    /// on `today` in `time_zone`.
    pub fn from_orders(orders: &[Order], today: Date, time_zone: &TimeZone) -> Self {
        orders.iter().fold(Self::default(), |mut stats, order| {
            stats.total_sales = stats.total_sales.saturating_add(order.total_amount);
            stats.total_orders += 1;

            if order.created_at.to_zoned(time_zone.clone()).date() == today {
                stats.today_sales = stats.today_sales.saturating_add(order.total_amount);
            }

            stats
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    pub stats: SalesStats,

    /// Newest first
    pub recent: Vec<Order>,
    pub menu: Vec<MenuItem>,
    pub categories: Vec<Category>,
}

pub struct AdminDashboard {
    orders: Arc<dyn OrdersService>,
    menu: Arc<dyn MenuService>,
    time_zone: TimeZone,
    options: PollOptions,
}

impl AdminDashboard {
    pub fn new(orders: Arc<dyn OrdersService>, menu: Arc<dyn MenuService>) -> Self {
        Self {
            orders,
            menu,
            time_zone: TimeZone::system(),
            options: PollOptions::with_intervals(ADMIN_FAST_INTERVAL, ADMIN_SLOW_INTERVAL),
        }
    }

    /// Uses `options` for its intervals and overlap policy.
    #[must_use]
    pub fn with_options(mut self, options: PollOptions) -> Self {
        self.options = options;
        self
    }

    /// Time zone that decides which orders count as today's.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Deletes served and cancelled orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the orders cannot be deleted.
    pub async fn clear_history(&self) -> Result<u64, AdminError> {
        let purged = self.orders.purge_closed().await?;

        info!(purged, "transaction history cleared");

        Ok(purged)
    }

    /// Creates a menu item, or updates `editing` when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the form is invalid or the item cannot be saved.
    pub async fn save_item(
        &self,
        form: MenuItemForm,
        editing: Option<MenuItemUuid>,
    ) -> Result<MenuItem, AdminError> {
        let draft = form.validate()?;

        let item = match editing {
            Some(uuid) => self.menu.update_item(uuid, draft).await?,
            None => self.menu.create_item(draft).await?,
        };

        info!(item = %item.uuid, name = %item.name, "menu item saved");

        Ok(item)
    }

    /// Flips an item's availability on the customer menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the item cannot be updated.
    pub async fn toggle_availability(&self, item: &MenuItem) -> Result<MenuItem, AdminError> {
        let updated = self
            .menu
            .set_item_availability(item.uuid, !item.is_available)
            .await?;

        info!(
            item = %updated.uuid,
            is_available = updated.is_available,
            "menu item availability changed"
        );

        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns an error if the item cannot be deleted.
    pub async fn delete_item(&self, uuid: MenuItemUuid) -> Result<(), AdminError> {
        self.menu.delete_item(uuid).await?;

        info!(item = %uuid, "menu item deleted");

        Ok(())
    }
}

impl Debug for AdminDashboard {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AdminDashboard")
            .field("time_zone", &self.time_zone)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Dashboard for AdminDashboard {
    type View = AdminOverview;
    type Error = AdminError;

    fn name(&self) -> &'static str {
        "admin"
    }

    async fn load(&self) -> Result<AdminOverview, AdminError> {
        let sales = self
            .orders
            .list_by_status(OrderStatus::SALES.to_vec())
            .await?;

        let recent = self.orders.list_recent(RECENT_ORDERS).await?;
        let menu = self.menu.list_items(None).await?;
        let categories = self.menu.list_categories().await?;

        let today = Timestamp::now().to_zoned(self.time_zone.clone()).date();

        Ok(AdminOverview {
            stats: SalesStats::from_orders(&sales, today, &self.time_zone),
            recent,
            menu,
            categories,
        })
    }

    fn poll_options(&self, _view: Option<&AdminOverview>) -> PollOptions {
        self.options.clone().enabled(true).has_activity(false)
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use testresult::TestResult;

    use crate::{
        domain::{
            menu::{MockMenuService, models::CategoryUuid},
            orders::MockOrdersService,
        },
        test::fixtures::{make_menu_item, make_order},
    };

    use super::*;

    fn order_at(total: i64, created_at: &str) -> TestResult<Order> {
        Ok(Order {
            total_amount: Decimal::from(total),
            created_at: created_at.parse()?,
            ..make_order(OrderStatus::Served)
        })
    }

    #[test]
    fn stats_split_out_today() -> TestResult {
        let orders = [
            order_at(150, "2026-03-01T08:00:00Z")?,
            order_at(95, "2026-03-02T00:30:00Z")?,
            order_at(80, "2026-03-02T23:59:59Z")?,
        ];

        let stats = SalesStats::from_orders(&orders, date(2026, 3, 2), &TimeZone::UTC);

        assert_eq!(stats.total_sales, Decimal::from(325));
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.today_sales, Decimal::from(175));

        Ok(())
    }

    #[test]
    fn today_follows_the_local_calendar() -> TestResult {
        // 23:30 UTC on the 1st is already the 2nd in Manila (UTC+8)
        let orders = [order_at(100, "2026-03-01T23:30:00Z")?];
        let manila = TimeZone::fixed(jiff::tz::offset(8));

        let stats = SalesStats::from_orders(&orders, date(2026, 3, 2), &manila);

        assert_eq!(stats.today_sales, Decimal::from(100));

        Ok(())
    }

    #[test]
    fn oversized_sales_saturate() -> TestResult {
        let huge = Order {
            total_amount: Decimal::MAX,
            ..order_at(0, "2026-03-02T08:00:00Z")?
        };
        let orders = [huge.clone(), huge];

        let stats = SalesStats::from_orders(&orders, date(2026, 3, 2), &TimeZone::UTC);

        assert_eq!(stats.total_sales, Decimal::MAX);
        assert_eq!(stats.today_sales, Decimal::MAX);
        assert_eq!(stats.total_orders, 2);

        Ok(())
    }

    #[test]
    fn empty_sales_are_zero() {
        let stats = SalesStats::from_orders(&[], date(2026, 3, 2), &TimeZone::UTC);

        assert_eq!(stats, SalesStats::default());
    }

    #[tokio::test]
    async fn test_load_reads_sales_statuses_and_recent_orders() -> TestResult {
        let mut orders = MockOrdersService::new();
        let mut menu = MockMenuService::new();

        orders
            .expect_list_by_status()
            .once()
            .withf(|statuses| statuses.as_slice() == OrderStatus::SALES)
            .returning(|_| Ok(vec![make_order(OrderStatus::Ready)]));

        orders
            .expect_list_recent()
            .once()
            .withf(|limit| *limit == RECENT_ORDERS)
            .returning(|_| Ok(Vec::new()));

        menu.expect_list_items()
            .once()
            .withf(Option::is_none)
            .returning(|_| Ok(vec![make_menu_item(CategoryUuid::new())]));

        menu.expect_list_categories()
            .once()
            .returning(|| Ok(Vec::new()));

        let admin = AdminDashboard::new(Arc::new(orders), Arc::new(menu));
        let overview = admin.load().await?;

        assert_eq!(overview.stats.total_orders, 1);
        assert_eq!(overview.menu.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_availability_flips_the_flag() -> TestResult {
        let mut menu = MockMenuService::new();
        let item = make_menu_item(CategoryUuid::new());
        let uuid = item.uuid;

        menu.expect_set_item_availability()
            .once()
            .withf(move |u, available| *u == uuid && !*available)
            .returning(|_, is_available| {
                Ok(MenuItem {
                    is_available,
                    ..make_menu_item(CategoryUuid::new())
                })
            });

        let admin = AdminDashboard::new(Arc::new(MockOrdersService::new()), Arc::new(menu));

        assert!(!admin.toggle_availability(&item).await?.is_available);

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_forms_never_reach_the_backend() {
        let mut menu = MockMenuService::new();

        menu.expect_create_item().never();
        menu.expect_update_item().never();

        let admin = AdminDashboard::new(Arc::new(MockOrdersService::new()), Arc::new(menu));
        let result = admin.save_item(MenuItemForm::default(), None).await;

        assert!(matches!(
            result,
            Err(AdminError::Menu(MenuServiceError::MissingRequiredData("name")))
        ));
    }
}
