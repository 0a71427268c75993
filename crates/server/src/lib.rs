pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod telemetry;

pub use config::{ConfigError, LogFormat, ServerConfig};
pub use error::ApiError;
pub use server::{build_router, serve, AppState};
