use brewdesk_app::{
    context::AppContext,
    domain::{dashboards::OrderTracker, orders::models::OrderUuid},
};
use clap::Args;

use crate::{
    cli::{live, render},
    config::polling::PollingConfig,
};

#[derive(Debug, Args)]
pub(crate) struct TrackArgs {
    /// Order UUID, as shown after checkout
    #[arg(long)]
    order: OrderUuid,
}

pub(crate) async fn run(
    context: &AppContext,
    polling: &PollingConfig,
    args: TrackArgs,
) -> Result<(), String> {
    let tracker = OrderTracker::with_options(context.orders.clone(), args.order, polling.tracker());

    live::follow(tracker, render::tracked).await
}
