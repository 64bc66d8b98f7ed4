use std::sync::Arc;

use storage::EntityStore;

/// Shared handler state: the store every service call goes through.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn EntityStore>,
}

impl AppState {
    pub fn new(store: impl EntityStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &dyn EntityStore {
        self.store.as_ref()
    }
}
