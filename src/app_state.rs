use std::sync::Arc;

use crate::services::catalog::RecipeCatalogClient;

/// Shared application state passed to all route handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn RecipeCatalogClient>,
}

impl AppState {
    pub fn new(catalog: impl RecipeCatalogClient + 'static) -> Self {
        Self {
            catalog: Arc::new(catalog),
        }
    }
}
