//! Menu
//!
//! Categories, menu items and add-ons as stored by the hosted backend, plus the
//! customisation step that turns a menu item into a cart line item.

pub mod customise;
pub mod errors;
pub mod models;
pub mod service;

pub use errors::MenuServiceError;
pub use service::*;
