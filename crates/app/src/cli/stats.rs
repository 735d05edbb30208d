use brewdesk_app::{context::AppContext, domain::dashboards::AdminDashboard};
use clap::{Args, Subcommand};

use crate::{
    cli::{emit, live, render},
    config::polling::PollingConfig,
};

#[derive(Debug, Args)]
pub(crate) struct StatsCommand {
    #[command(subcommand)]
    action: Option<StatsAction>,
}

#[derive(Debug, Subcommand)]
enum StatsAction {
    /// Delete every served and cancelled order
    Purge,
}

pub(crate) async fn run(
    context: &AppContext,
    polling: &PollingConfig,
    command: StatsCommand,
) -> Result<(), String> {
    let dashboard = AdminDashboard::new(context.orders.clone(), context.menu.clone())
        .with_options(polling.admin());

    match command.action {
        None => live::follow(dashboard, render::overview).await,
        Some(StatsAction::Purge) => {
            let purged = dashboard
                .clear_history()
                .await
                .map_err(|error| format!("failed to clear history: {error}"))?;

            emit(&format!("removed {purged} closed orders"));

            Ok(())
        }
    }
}
