//! `[graphql]` section of `hubql.toml`.
//!
//! ```toml
//! [graphql]
//! enabled = true
//! max_depth = 15
//! max_complexity = 500
//! introspection = true
//! ```
//!
//! Every nesting level of a relational field is another round of GitHub
//! requests, so `max_depth` doubles as the cap on upstream fan-out.

use serde::{Deserialize, Serialize};

use crate::SchemaBuilderConfig;

/// GraphQL endpoint settings. Missing keys take their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphQLConfig {
    /// Mount `/graphql`.
    pub enabled: bool,
    pub max_depth: usize,
    pub max_complexity: usize,
    /// Answer `__schema` / `__type` queries.
    pub introspection: bool,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        let limits = SchemaBuilderConfig::default();
        Self {
            enabled: true,
            max_depth: limits.max_depth,
            max_complexity: limits.max_complexity,
            introspection: limits.introspection_enabled,
        }
    }
}

impl GraphQLConfig {
    /// Checks the query limits.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending key.
    pub fn validate(&self) -> Result<(), String> {
        match (self.max_depth, self.max_complexity) {
            (0, _) => Err("graphql.max_depth must be > 0".into()),
            (_, 0) => Err("graphql.max_complexity must be > 0".into()),
            (depth, complexity) if complexity < depth => Err(format!(
                "graphql.max_complexity ({complexity}) must be >= graphql.max_depth ({depth})"
            )),
            _ => Ok(()),
        }
    }
}

impl From<&GraphQLConfig> for SchemaBuilderConfig {
    fn from(config: &GraphQLConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            max_complexity: config.max_complexity,
            introspection_enabled: config.introspection,
        }
    }
}
