//! Shared application state for request handlers.

use std::sync::Arc;

use dispatch_core::Dispatcher;

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Dispatcher::default())
    }
}
