//! Deferred schema construction.
//!
//! `LazySchema` builds the schema on first access and caches it, so the
//! server can accept connections before the type registry is assembled.

use std::sync::Arc;

use async_graphql::dynamic::Schema;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use super::HubSchemaBuilder;
use crate::error::GraphQLError;

/// State of the lazy schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    /// Schema has not been built yet.
    Uninitialized,
    /// Schema is currently being built.
    Building,
    /// Schema is ready for use.
    Ready,
    /// Schema build failed.
    Failed,
}

/// Thread-safe lazy schema holder.
///
/// # Example
///
/// ```ignore
/// let lazy_schema = LazySchema::new(HubSchemaBuilder::default());
///
/// // First access triggers the build
/// let schema = lazy_schema.get_or_build().await?;
///
/// // Later accesses reuse the cached schema
/// let schema = lazy_schema.get_or_build().await?;
/// ```
pub struct LazySchema {
    schema: RwLock<Option<Arc<Schema>>>,

    /// Serializes builds.
    build_lock: Mutex<()>,

    state: RwLock<SchemaState>,

    builder: Arc<HubSchemaBuilder>,

    /// Message of the last failed build, for `/readyz` diagnostics.
    last_error: RwLock<Option<String>>,
}

impl LazySchema {
    /// Creates a new lazy schema around `builder`.
    #[must_use]
    pub fn new(builder: HubSchemaBuilder) -> Self {
        Self {
            schema: RwLock::new(None),
            build_lock: Mutex::new(()),
            state: RwLock::new(SchemaState::Uninitialized),
            builder: Arc::new(builder),
            last_error: RwLock::new(None),
        }
    }

    /// Returns the current state of the schema.
    pub async fn state(&self) -> SchemaState {
        *self.state.read().await
    }

    /// Gets the schema, building it if necessary.
    ///
    /// Callers that arrive while another task is building get an error
    /// instead of blocking; use [`get_or_build_wait`](Self::get_or_build_wait)
    /// where waiting is acceptable.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::SchemaInitializing` if another build is in progress.
    /// Returns `GraphQLError::SchemaBuildFailed` if the build fails.
    pub async fn get_or_build(&self) -> Result<Arc<Schema>, GraphQLError> {
        if let Some(schema) = self.get().await {
            return Ok(schema);
        }

        if self.state().await == SchemaState::Building {
            return Err(GraphQLError::SchemaInitializing);
        }

        let Ok(_guard) = self.build_lock.try_lock() else {
            return Err(GraphQLError::SchemaInitializing);
        };

        if let Some(schema) = self.get().await {
            return Ok(schema);
        }

        self.build_locked().await
    }

    /// Gets the schema, waiting for an in-progress build instead of failing.
    ///
    /// A previously failed build is reported again rather than retried.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::SchemaBuildFailed` if the build fails.
    pub async fn get_or_build_wait(&self) -> Result<Arc<Schema>, GraphQLError> {
        if let Some(schema) = self.get().await {
            return Ok(schema);
        }

        let _guard = self.build_lock.lock().await;

        if let Some(schema) = self.get().await {
            return Ok(schema);
        }

        if self.state().await == SchemaState::Failed
            && let Some(err) = self.last_error().await
        {
            return Err(GraphQLError::SchemaBuildFailed(err));
        }

        self.build_locked().await
    }

    /// Runs the build. The caller must hold `build_lock`.
    async fn build_locked(&self) -> Result<Arc<Schema>, GraphQLError> {
        *self.state.write().await = SchemaState::Building;
        info!("Building GraphQL schema...");

        match self.builder.build() {
            Ok(schema) => {
                let schema = Arc::new(schema);
                *self.schema.write().await = Some(Arc::clone(&schema));
                *self.state.write().await = SchemaState::Ready;
                *self.last_error.write().await = None;
                info!("GraphQL schema built successfully");
                Ok(schema)
            }
            Err(e) => {
                let error_msg = e.to_string();
                warn!(error = %error_msg, "Failed to build GraphQL schema");
                *self.state.write().await = SchemaState::Failed;
                *self.last_error.write().await = Some(error_msg.clone());
                Err(GraphQLError::SchemaBuildFailed(error_msg))
            }
        }
    }

    /// Gets the schema if it is already built, without triggering a build.
    pub async fn get(&self) -> Option<Arc<Schema>> {
        self.schema.read().await.clone()
    }

    /// Returns the last build error, if any.
    pub async fn last_error(&self) -> Option<String> {
        self.last_error.read().await.clone()
    }

    /// Returns whether the schema is ready for use.
    pub async fn is_ready(&self) -> bool {
        self.state().await == SchemaState::Ready
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_uninitialized() {
        let lazy = LazySchema::new(HubSchemaBuilder::default());

        assert_eq!(lazy.state().await, SchemaState::Uninitialized);
        assert!(!lazy.is_ready().await);
        assert!(lazy.get().await.is_none());
        assert!(lazy.last_error().await.is_none());
    }

    #[tokio::test]
    async fn test_first_access_builds_and_caches() {
        let lazy = LazySchema::new(HubSchemaBuilder::default());

        let first = lazy.get_or_build().await.unwrap();
        assert_eq!(lazy.state().await, SchemaState::Ready);
        assert!(lazy.is_ready().await);

        let second = lazy.get_or_build().await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_wait_mode_reuses_built_schema() {
        let lazy = LazySchema::new(HubSchemaBuilder::default());

        let built = lazy.get_or_build_wait().await.unwrap();
        let cached = lazy.get().await.unwrap();
        assert!(Arc::ptr_eq(&built, &cached));
    }

    #[tokio::test]
    async fn test_initializing_while_build_lock_held() {
        let lazy = LazySchema::new(HubSchemaBuilder::default());

        let _guard = lazy.build_lock.lock().await;
        let err = lazy.get_or_build().await.unwrap_err();
        assert!(matches!(err, GraphQLError::SchemaInitializing));
    }
}
