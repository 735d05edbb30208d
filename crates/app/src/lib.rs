//! Café storefront and staff console services.
//!
//! Menu browsing and customisation, checkout of the [`brewdesk`] cart into
//! orders, and the polling dashboards staff use to work those orders.

pub mod backend;
pub mod context;
pub mod domain;
pub mod uuids;

#[cfg(test)]
mod test;
