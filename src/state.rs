use crate::storage::FileStore;
use crate::store::LocalStore;
use std::sync::Arc;
use tokio::sync::Mutex;

pub type Store = LocalStore<FileStore>;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<Store>>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
        }
    }
}
