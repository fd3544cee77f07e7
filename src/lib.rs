pub mod app;
pub mod dates;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod report;
pub mod state;
pub mod storage;
pub mod store;
pub mod tracker;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{resolve_data_dir, FileStore};
pub use store::{ExecutionStore, LocalStore};
