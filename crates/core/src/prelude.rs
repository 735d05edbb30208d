//! Brewdesk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        Addons, CART_STORAGE_KEY, CartAddon, CartLineItem, CartStore, LineItemId, NewLineItem,
        snapshot::SnapshotError,
    },
    poller::{
        OverlapPolicy, PollOptions, PollState, Poller, PollerHandle, Visibility, VisibilityWatch,
    },
    pricing::{PricingError, format_amount},
    storage::{FileStore, KeyValueStore, MemoryStore, StorageError},
};
