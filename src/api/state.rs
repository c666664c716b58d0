use crate::store::CustomerStore;
use std::sync::Arc;

/// Shared handle passed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CustomerStore>,
}

impl AppState {
    pub fn new(store: impl CustomerStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn from_arc(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }
}
