//! Backends
//!
//! Implementations of the menu and orders services: [`RestBackend`] talks to
//! the hosted database over its REST interface, [`MemoryBackend`] keeps
//! everything in process.

pub mod memory;
pub mod rest;

pub use memory::MemoryBackend;
pub use rest::{RestBackend, RestConfig, RestError};
