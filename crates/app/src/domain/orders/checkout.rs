//! Checkout
//!
//! Turns the cart into an order. The cart is cleared only once the backend has
//! accepted the order; any failure leaves it as it was so the customer can try
//! again.

use brewdesk::{
    cart::{CartLineItem, CartStore, LineItemId},
    pricing,
    storage::KeyValueStore,
};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::orders::{
    OrdersService, OrdersServiceError,
    models::{NewOrder, NewOrderItem, NewOrderItemAddon, Order, OrderType, PaymentMethod},
};

/// Details collected from the customer at checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutDetails {
    pub customer_name: String,
    pub customer_phone: String,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("missing required field: {0}")]
    MissingDetails(&'static str),

    #[error("cart is empty")]
    EmptyCart,

    #[error("line item {0} has an invalid menu reference")]
    InvalidLineItem(LineItemId),

    #[error("failed to submit order")]
    Submit(#[from] OrdersServiceError),
}

/// Submits the cart as a new order and clears it on success.
///
/// # Errors
///
/// - [`CheckoutError::MissingDetails`]: the name or phone number is blank.
/// - [`CheckoutError::EmptyCart`]: there is nothing to order.
/// - [`CheckoutError::InvalidLineItem`]: a line item does not carry valid ids.
/// - [`CheckoutError::Submit`]: the backend rejected the order.
pub async fn checkout<S: KeyValueStore>(
    cart: &mut CartStore<S>,
    details: &CheckoutDetails,
    orders: &dyn OrdersService,
) -> Result<Order, CheckoutError> {
    let order = build_order(cart.items(), details)?;

    let order = orders.create_order(order).await.inspect_err(|error| {
        warn!(%error, "order submission failed; cart kept");
    })?;

    info!(
        order = %order.uuid,
        number = order.number(),
        total = %order.total_amount,
        "order placed"
    );

    cart.clear();

    Ok(order)
}

/// Translates line items into the order, item and add-on records to submit.
///
/// Each item records its base price as the unit price and `base × quantity` as
/// its subtotal. The order total is the cart total, add-ons included.
///
/// # Errors
///
/// See [`checkout`].
pub fn build_order(
    items: &[CartLineItem],
    details: &CheckoutDetails,
) -> Result<NewOrder, CheckoutError> {
    let customer_name = required(&details.customer_name, "customer_name")?;
    let customer_phone = required(&details.customer_phone, "customer_phone")?;

    if items.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }

    let total_amount = pricing::total_amount(items);

    let items = items
        .iter()
        .map(build_item)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewOrder {
        customer_name,
        customer_phone,
        order_type: details.order_type,
        payment_method: details.payment_method,
        total_amount,
        items,
    })
}

fn build_item(item: &CartLineItem) -> Result<NewOrderItem, CheckoutError> {
    let invalid = || CheckoutError::InvalidLineItem(item.id.clone());

    let menu_item_uuid = item.menu_item_id.parse().map_err(|_parse| invalid())?;

    let addons = item
        .addons
        .iter()
        .map(|addon| {
            Ok(NewOrderItemAddon {
                addon_uuid: addon.id.parse().map_err(|_parse| invalid())?,
                quantity: addon.quantity,
                price: addon.price,
            })
        })
        .collect::<Result<Vec<_>, CheckoutError>>()?;

    Ok(NewOrderItem {
        menu_item_uuid,
        quantity: item.quantity,
        unit_price: item.base_price,
        subtotal: pricing::line_total(item.base_price, &[], item.quantity),
        notes: item.notes.clone(),
        addons,
    })
}

fn required(value: &str, field: &'static str) -> Result<String, CheckoutError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(CheckoutError::MissingDetails(field));
    }

    Ok(value.to_string())
}
