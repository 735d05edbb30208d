use brewdesk_app::{context::AppContext, domain::dashboards::BaristaDashboard};
use clap::{Args, Subcommand};

use crate::{
    cli::{cashier::OrderArgs, emit, live, render},
    config::polling::PollingConfig,
};

#[derive(Debug, Args)]
pub(crate) struct BaristaCommand {
    #[command(subcommand)]
    action: Option<BaristaAction>,
}

#[derive(Debug, Subcommand)]
enum BaristaAction {
    /// Start making an accepted order
    Start(OrderArgs),

    /// Mark an order ready for pickup
    Ready(OrderArgs),

    /// Mark an order handed over
    Served(OrderArgs),
}

pub(crate) async fn run(
    context: &AppContext,
    polling: &PollingConfig,
    command: BaristaCommand,
) -> Result<(), String> {
    let dashboard = BaristaDashboard::with_options(context.orders.clone(), polling.barista());

    let result = match command.action {
        None => return live::follow(dashboard, render::barista).await,
        Some(BaristaAction::Start(args)) => dashboard.start_preparing(args.order).await,
        Some(BaristaAction::Ready(args)) => dashboard.mark_ready(args.order).await,
        Some(BaristaAction::Served(args)) => dashboard.mark_served(args.order).await,
    };

    let order = result.map_err(|error| format!("failed to update order: {error}"))?;

    emit(&render::order(&order));

    Ok(())
}
