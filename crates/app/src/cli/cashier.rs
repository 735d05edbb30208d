use brewdesk_app::{
    context::AppContext,
    domain::{dashboards::CashierDashboard, orders::models::OrderUuid},
};
use clap::{Args, Subcommand};

use crate::{
    cli::{emit, live, render},
    config::polling::PollingConfig,
};

#[derive(Debug, Args)]
pub(crate) struct CashierCommand {
    #[command(subcommand)]
    action: Option<CashierAction>,
}

#[derive(Debug, Subcommand)]
enum CashierAction {
    /// Accept a pending order into the kitchen
    Accept(OrderArgs),

    /// Reject a pending order
    Reject(OrderArgs),
}

#[derive(Debug, Args)]
pub(crate) struct OrderArgs {
    /// Order UUID
    #[arg(long)]
    pub order: OrderUuid,
}

pub(crate) async fn run(
    context: &AppContext,
    polling: &PollingConfig,
    command: CashierCommand,
) -> Result<(), String> {
    let dashboard = CashierDashboard::with_options(context.orders.clone(), polling.cashier());

    let order = match command.action {
        None => return live::follow(dashboard, |orders| render::pending(orders)).await,
        Some(CashierAction::Accept(args)) => dashboard
            .accept(args.order)
            .await
            .map_err(|error| format!("failed to accept order: {error}"))?,
        Some(CashierAction::Reject(args)) => dashboard
            .reject(args.order)
            .await
            .map_err(|error| format!("failed to reject order: {error}"))?,
    };

    emit(&render::order(&order));

    Ok(())
}
