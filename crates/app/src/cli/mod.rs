use brewdesk_app::context::AppContext;
use clap::Subcommand;

use crate::config::ConsoleConfig;

mod barista;
mod cart;
mod cashier;
mod checkout;
mod live;
mod menu;
mod render;
mod stats;
mod track;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Watch pending orders, or accept and reject them
    Cashier(cashier::CashierCommand),

    /// Watch the kitchen queues, or move orders along
    Barista(barista::BaristaCommand),

    /// Follow a single order until it is served
    Track(track::TrackArgs),

    /// Watch sales stats, or clear the transaction history
    Stats(stats::StatsCommand),

    /// Browse and manage the menu
    Menu(menu::MenuCommand),

    /// Inspect and edit the local cart
    Cart(cart::CartCommand),

    /// Submit the local cart as an order
    Checkout(checkout::CheckoutArgs),
}

pub(crate) async fn run(config: ConsoleConfig) -> Result<(), String> {
    let context = AppContext::rest(config.backend.rest_config());

    match config.command {
        Command::Cashier(command) => cashier::run(&context, &config.polling, command).await,
        Command::Barista(command) => barista::run(&context, &config.polling, command).await,
        Command::Track(args) => track::run(&context, &config.polling, args).await,
        Command::Stats(command) => stats::run(&context, &config.polling, command).await,
        Command::Menu(command) => menu::run(&context, command).await,
        Command::Cart(command) => cart::run(&context, &config.backend.data_dir, command).await,
        Command::Checkout(args) => {
            checkout::run(&context, &config.backend.data_dir, args).await
        }
    }
}

#[expect(clippy::print_stdout, reason = "console views are written to stdout")]
pub(crate) fn emit(text: &str) {
    println!("{text}");
}
