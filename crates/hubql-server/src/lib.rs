pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod server;

pub use config::{AppConfig, LoggingConfig, ServerConfig};
pub use observability::{LogLevel, init_tracing};
pub use server::{AppState, HubqlServer, ServerBuilder, ServerError, build_app, build_graphql_state};
