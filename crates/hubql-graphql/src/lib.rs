//! # hubql-graphql
//!
//! A GraphQL schema that mirrors a subset of the GitHub REST API.
//!
//! Object types pass scalar fields straight through from a fetched JSON
//! payload, while relational fields (`repos`, `starred_repos`,
//! `users_following`, `user_followers`, `following_url`) issue one more GET
//! to a URL found on the parent object. Nothing is cached: every selection
//! of a relational field is one fetch in one query.
//!
//! ## Schema
//!
//! ```graphql
//! type Query {
//!   user(login: String!): UserInfo
//!   repo(owner: String!, name: String!): DetailedRepoInfo
//! }
//! ```
//!
//! `UserInfo`, `OwnerRepoInfo` and `DetailedRepoInfo` reference each other
//! by name, so the cycle `UserInfo.repos -> DetailedRepoInfo.owner ->
//! OwnerRepoInfo` needs no special handling at declaration time.
//!
//! ## Endpoints
//!
//! - `POST /graphql` - JSON body with `query`, `operationName`, `variables`
//! - `GET /graphql` - same fields as URL parameters
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`types`] - Object type declarations and shared field descriptors
//! - [`schema`] - Schema composition and lazy loading
//! - [`resolvers`] - URL template helpers and fetch glue
//! - [`context`] - Per-request execution context
//! - [`handler`] - Axum HTTP handlers
//! - [`error`] - Error types

pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod resolvers;
pub mod schema;
pub mod types;

// Re-export main types
pub use config::GraphQLConfig;
pub use context::{GraphQLContext, GraphQLContextBuilder};
pub use error::{GraphQLError, ResolveError};
pub use handler::{GraphQLState, graphql_handler, graphql_handler_get};
pub use schema::{HubSchemaBuilder, LazySchema, SchemaBuilderConfig, SchemaState};

/// Result type for GraphQL operations.
pub type Result<T> = std::result::Result<T, GraphQLError>;
