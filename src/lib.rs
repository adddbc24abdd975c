pub mod config;
pub mod error;
pub mod export;
pub mod observability;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use storage::Snapshot;
