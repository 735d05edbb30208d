//! App Context

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    sync::Arc,
};

use crate::{
    backend::{MemoryBackend, RestBackend, RestConfig},
    domain::{menu::MenuService, orders::OrdersService},
};

#[derive(Clone)]
pub struct AppContext {
    pub menu: Arc<dyn MenuService>,
    pub orders: Arc<dyn OrdersService>,
}

impl AppContext {
    /// Build application context backed by the hosted REST backend.
    #[must_use]
    pub fn rest(config: RestConfig) -> Self {
        let backend = Arc::new(RestBackend::new(config));

        Self {
            menu: Arc::clone(&backend) as Arc<dyn MenuService>,
            orders: backend,
        }
    }

    /// Build application context backed by an in-process store.
    #[must_use]
    pub fn memory(backend: MemoryBackend) -> Self {
        let backend = Arc::new(backend);

        Self {
            menu: Arc::clone(&backend) as Arc<dyn MenuService>,
            orders: backend,
        }
    }
}

impl Debug for AppContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
