//! # hubql-upstream
//!
//! Outbound HTTP layer for the hubql GraphQL facade.
//!
//! This crate defines the [`UpstreamClient`] trait that every field resolver
//! fetches through, plus the production implementation backed by `reqwest`.
//! The client is injected into each GraphQL request instead of living in
//! module-level state, so tests can swap in a double and deployments can
//! tune timeouts and headers.
//!
//! ## Example
//!
//! ```ignore
//! use hubql_upstream::{ReqwestUpstream, UpstreamClient, UpstreamConfig};
//!
//! let client = ReqwestUpstream::new(&UpstreamConfig::default())?;
//! let user = client.get_json("https://api.github.com/users/octocat").await?;
//! assert_eq!(user["login"], "octocat");
//! ```
//!
//! ## Implementing a client
//!
//! ```ignore
//! use async_trait::async_trait;
//! use hubql_upstream::{UpstreamClient, UpstreamError};
//!
//! struct Canned(serde_json::Value);
//!
//! #[async_trait]
//! impl UpstreamClient for Canned {
//!     async fn get_json(&self, _url: &str) -> Result<serde_json::Value, UpstreamError> {
//!         Ok(self.0.clone())
//!     }
//! }
//! ```

mod client;
mod config;
mod error;
mod traits;

pub use client::{GITHUB_V3_ACCEPT, ReqwestUpstream};
pub use config::UpstreamConfig;
pub use error::{ErrorCategory, UpstreamError};
pub use traits::UpstreamClient;

/// Shared handle to an upstream client, as stored in the GraphQL context.
pub type DynUpstream = std::sync::Arc<dyn UpstreamClient>;
