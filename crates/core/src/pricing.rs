//! Prices

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::cart::{CartAddon, CartLineItem};

/// Errors that can occur while presenting an amount.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The amount does not fit in the currency's minor units.
    #[error("amount {0} is out of range for {1}")]
    OutOfRange(Decimal, &'static str),
}

/// Sum of `price × quantity` over the given add-ons.
///
/// Totals saturate at the bounds of [`Decimal`] instead of overflowing.
pub fn addons_total(addons: &[CartAddon]) -> Decimal {
    addons
        .iter()
        .fold(Decimal::ZERO, |sum, addon| sum.saturating_add(addon.total()))
}

/// Price of a single unit: the base price plus every add-on.
pub fn unit_total(base_price: Decimal, addons: &[CartAddon]) -> Decimal {
    base_price.saturating_add(addons_total(addons))
}

/// Price of a whole line: `(base + Σ add-ons) × quantity`.
pub fn line_total(base_price: Decimal, addons: &[CartAddon], quantity: u32) -> Decimal {
    unit_total(base_price, addons).saturating_mul(Decimal::from(quantity))
}

/// [`line_total`], or `None` if any step overflows.
pub fn checked_line_total(
    base_price: Decimal,
    addons: &[CartAddon],
    quantity: u32,
) -> Option<Decimal> {
    let addons = addons.iter().try_fold(Decimal::ZERO, |sum, addon| {
        sum.checked_add(addon.price.checked_mul(Decimal::from(addon.quantity))?)
    })?;

    base_price
        .checked_add(addons)?
        .checked_mul(Decimal::from(quantity))
}

/// Calculates the total amount of a list of line items.
///
/// Always recomputed from the items themselves; an empty list totals zero.
pub fn total_amount(items: &[CartLineItem]) -> Decimal {
    items
        .iter()
        .fold(Decimal::ZERO, |sum, item| sum.saturating_add(item.line_total()))
}

/// Sum of the quantities of a list of line items.
pub fn total_items(items: &[CartLineItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).sum()
}

/// Formats an amount in the given currency, rounded to its minor unit.
///
/// # Errors
///
/// Returns [`PricingError::OutOfRange`] if the amount cannot be expressed in minor units.
pub fn format_amount(amount: Decimal, currency: &'static Currency) -> Result<String, PricingError> {
    let scale = Decimal::from(10_i64.pow(currency.exponent));

    let out_of_range = || PricingError::OutOfRange(amount, currency.iso_alpha_code);

    let minor = amount
        .checked_mul(scale)
        .ok_or_else(out_of_range)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(out_of_range)?;

    Ok(format!("{}", Money::from_minor(minor, currency)))
}
