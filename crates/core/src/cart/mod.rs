//! Cart
//!
//! The customer's in-progress order. Line items are kept in insertion order,
//! totals are always derived from them, and every mutation writes the full
//! snapshot back to durable storage under [`CART_STORAGE_KEY`].
//!
//! The store assumes a single writer: two processes sharing one storage slot
//! will overwrite each other's snapshots.

mod items;
pub mod snapshot;
mod store;

pub use items::{Addons, CartAddon, CartLineItem, LineItemId, NewLineItem};
pub use snapshot::CART_STORAGE_KEY;
pub use store::CartStore;
