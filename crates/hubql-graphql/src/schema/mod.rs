//! GraphQL schema building and lazy loading.
//!
//! ## Components
//!
//! - [`HubSchemaBuilder`] - Registers the object types and the `Query` root
//! - [`LazySchema`] - Builds the schema once, on first use, and caches it
//!
//! ## Construction
//!
//! Object types refer to each other by name only. All of them are
//! registered on one `SchemaBuilder` and the names are resolved in
//! `finish()`, which is what lets `UserInfo -> DetailedRepoInfo ->
//! OwnerRepoInfo` form a cycle.

mod builder;
mod lazy;

pub use builder::{HubSchemaBuilder, QUERY, SchemaBuilderConfig};
pub use lazy::{LazySchema, SchemaState};
