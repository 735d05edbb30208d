//! Orders
//!
//! Orders placed from the storefront and worked through by staff.

pub mod checkout;
pub mod errors;
pub mod models;
mod number;
pub mod service;

pub use errors::OrdersServiceError;
pub use number::order_number;
pub use service::*;
