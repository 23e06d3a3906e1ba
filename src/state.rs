use std::sync::Arc;

use crate::storage::OrderStorage;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn OrderStorage>,
}
