//! Application domain.

pub mod dashboards;
pub mod menu;
pub mod orders;
