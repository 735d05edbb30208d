use std::path::Path;

use brewdesk::{cart::CartStore, storage::FileStore};
use brewdesk_app::{
    context::AppContext,
    domain::orders::{
        checkout::{CheckoutDetails, checkout},
        models::{OrderType, PaymentMethod},
    },
};
use clap::Args;

use crate::cli::{emit, render};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// Name to call out at pickup
    #[arg(long)]
    name: String,

    /// Contact number
    #[arg(long)]
    phone: String,

    #[arg(long, value_enum, default_value_t = OrderType::DineIn)]
    order_type: OrderType,

    #[arg(long, value_enum, default_value_t = PaymentMethod::Cash)]
    payment: PaymentMethod,
}

pub(crate) async fn run(
    context: &AppContext,
    data_dir: &Path,
    args: CheckoutArgs,
) -> Result<(), String> {
    let mut cart = CartStore::open(FileStore::new(data_dir));

    let details = CheckoutDetails {
        customer_name: args.name,
        customer_phone: args.phone,
        order_type: args.order_type,
        payment_method: args.payment,
    };

    let order = checkout(&mut cart, &details, context.orders.as_ref())
        .await
        .map_err(|error| format!("checkout failed: {error}"))?;

    emit(&render::order(&order));
    emit(&format!(
        "\nFollow your order with: brewdesk track --order {}",
        order.uuid
    ));

    Ok(())
}
