//! Shared application state.

use std::sync::Arc;

use todovault_core::storage::ObjectStore;

use crate::assist::{AssistService, TextGenerator};
use crate::config::Config;
use crate::store::TodoStore;

/// Shared application state.
///
/// Cloned for each request handler; the store and assist service are
/// behind `Arc`s so all handlers operate on the same cached collection.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TodoStore>,
    pub assist: Arc<AssistService>,
    pub page_size: usize,
}

impl AppState {
    /// Builds the state over the given blob backend and text generator.
    pub fn new(
        config: &Config,
        blobs: Arc<dyn ObjectStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            store: Arc::new(TodoStore::new(blobs, config.object_key.clone())),
            assist: Arc::new(AssistService::new(generator)),
            page_size: config.page_size,
        }
    }
}
