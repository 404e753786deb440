use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::storage::LocalMatchStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<LocalMatchStore>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = LocalMatchStore::new(&config.storage());
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
        }
    }
}
