pub mod auth;
pub mod config;
pub mod constants;
#[cfg(feature = "db")]
pub mod db;
pub mod domain;
pub mod error;
pub mod graphql;
pub mod logging;
pub mod metrics;
pub mod server;
pub mod storage;

pub use error::{AppError, Result};
