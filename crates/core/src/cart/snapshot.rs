//! Cart snapshots
//!
//! A snapshot is the JSON array of line items written to durable storage after
//! every cart mutation. Reading is forgiving: anything that is not a valid
//! array of line items is treated as an empty cart.

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::warn;

use crate::pricing;

use super::CartLineItem;

/// Storage key the cart snapshot lives under.
pub const CART_STORAGE_KEY: &str = "brewdesk-cart";

/// Errors raised while encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored value is not a JSON array of line items.
    #[error("malformed cart snapshot")]
    Malformed(#[source] serde_json::Error),

    /// The line items could not be serialised.
    #[error("failed to encode cart snapshot")]
    Encode(#[source] serde_json::Error),
}

/// Serialises line items, preserving their order.
///
/// # Errors
///
/// Returns [`SnapshotError::Encode`] if serialisation fails.
pub fn encode(items: &[CartLineItem]) -> Result<String, SnapshotError> {
    serde_json::to_string(items).map_err(SnapshotError::Encode)
}

/// Parses a snapshot back into line items.
///
/// Records with a quantity of zero are dropped so a restored cart upholds the
/// same quantity floor as a live one. Records whose price would push the cart
/// total out of [`Decimal`] range are dropped as well.
///
/// # Errors
///
/// Returns [`SnapshotError::Malformed`] if the input is not a valid snapshot.
pub fn decode(raw: &str) -> Result<Vec<CartLineItem>, SnapshotError> {
    let mut items: Vec<CartLineItem> = serde_json::from_str(raw).map_err(SnapshotError::Malformed)?;

    let mut total = Decimal::ZERO;

    items.retain(|item| {
        if item.quantity == 0 {
            return false;
        }

        let checked = pricing::checked_line_total(item.base_price, &item.addons, item.quantity)
            .and_then(|line| total.checked_add(line));

        match checked {
            Some(running) => {
                total = running;
                true
            }
            None => {
                warn!(id = %item.id, "dropping cart record with an out-of-range total");
                false
            }
        }
    });

    Ok(items)
}

/// Decodes an optional snapshot, falling back to an empty cart.
pub fn decode_or_empty(raw: Option<&str>) -> Vec<CartLineItem> {
    let Some(raw) = raw.filter(|raw| !raw.trim().is_empty()) else {
        return Vec::new();
    };

    decode(raw).unwrap_or_else(|error| {
        warn!(%error, "discarding unreadable cart snapshot");
        Vec::new()
    })
}
