// Library surface for the binary and for headless/integration tests.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod error;
pub mod runtime;
pub mod session;
pub mod ui;
pub mod word_store;

pub use app::App;
pub use error::{Result, TimeMeError};
