//! Brewdesk
//!
//! Client-side core of the Brewdesk café storefront: the customer's shopping
//! cart with its persisted snapshot, and the adaptive poller that keeps staff
//! dashboards and order tracking fresh.

pub mod cart;
pub mod poller;
pub mod prelude;
pub mod pricing;
pub mod storage;
