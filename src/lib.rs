pub mod app;
pub mod backend;
pub mod charts;
pub mod config;
pub mod errors;
pub mod filter;
pub mod format;
pub mod handlers;
pub mod models;
pub mod pager;
pub mod sort;
pub mod state;
pub mod store;
pub mod ui;

pub use app::router;
pub use backend::{CatchBackend, HttpBackend};
pub use config::Config;
pub use state::AppState;
