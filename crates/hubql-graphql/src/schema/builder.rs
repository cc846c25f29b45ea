//! Schema composition.
//!
//! `HubSchemaBuilder` assembles the three GitHub object types and the
//! `Query` root into an async-graphql dynamic schema.

use async_graphql::dynamic::{Field, InputValue, Object, Schema, TypeRef};
use tracing::debug;

use crate::error::GraphQLError;
use crate::resolvers::QueryResolver;
use crate::types::{self, DETAILED_REPO_INFO, USER_INFO};

/// Name of the query root type.
pub const QUERY: &str = "Query";

/// Configuration for the schema builder.
#[derive(Debug, Clone)]
pub struct SchemaBuilderConfig {
    /// Maximum query depth allowed.
    pub max_depth: usize,

    /// Maximum query complexity allowed.
    pub max_complexity: usize,

    /// Whether to enable introspection queries.
    pub introspection_enabled: bool,
}

impl Default for SchemaBuilderConfig {
    fn default() -> Self {
        Self {
            max_depth: 15,
            max_complexity: 500,
            introspection_enabled: true,
        }
    }
}

/// Builds the GitHub facade schema.
///
/// # Example
///
/// ```ignore
/// let schema = HubSchemaBuilder::new(SchemaBuilderConfig::default()).build()?;
/// let response = schema
///     .execute(async_graphql::Request::new("{ user(login: \"octocat\") { name } }").data(context))
///     .await;
/// ```
#[derive(Debug, Clone, Default)]
pub struct HubSchemaBuilder {
    config: SchemaBuilderConfig,
}

impl HubSchemaBuilder {
    /// Creates a new schema builder.
    #[must_use]
    pub fn new(config: SchemaBuilderConfig) -> Self {
        Self { config }
    }

    /// Builds the GraphQL schema.
    ///
    /// # Errors
    ///
    /// Returns `GraphQLError::SchemaBuildFailed` if the type registry rejects
    /// the declarations (dangling type names, duplicate fields).
    pub fn build(&self) -> Result<Schema, GraphQLError> {
        debug!("Starting GraphQL schema build");

        let mut schema_builder = Schema::build(QUERY, None, None)
            .register(types::user_info::object())
            .register(types::owner_repo_info::object())
            .register(types::detailed_repo_info::object())
            .register(self.build_query_type())
            .limit_depth(self.config.max_depth)
            .limit_complexity(self.config.max_complexity);

        if !self.config.introspection_enabled {
            schema_builder = schema_builder.disable_introspection();
        }

        let schema = schema_builder
            .finish()
            .map_err(|e| GraphQLError::SchemaBuildFailed(e.to_string()))?;

        debug!("GraphQL schema build complete");
        Ok(schema)
    }

    /// Builds the Query root.
    fn build_query_type(&self) -> Object {
        Object::new(QUERY)
            .description("Entry points into the GitHub REST API")
            .field(
                Field::new("user", TypeRef::named(USER_INFO), QueryResolver::user())
                    .description("Look up a user by login")
                    .argument(InputValue::new("login", TypeRef::named_nn(TypeRef::STRING))),
            )
            .field(
                Field::new("repo", TypeRef::named(DETAILED_REPO_INFO), QueryResolver::repo())
                    .description("Look up a repository by owner and name")
                    .argument(InputValue::new("owner", TypeRef::named_nn(TypeRef::STRING)))
                    .argument(InputValue::new("name", TypeRef::named_nn(TypeRef::STRING))),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_builds() {
        let schema = HubSchemaBuilder::default().build().unwrap();
        let sdl = schema.sdl();

        assert!(sdl.contains("type UserInfo"));
        assert!(sdl.contains("type OwnerRepoInfo"));
        assert!(sdl.contains("type DetailedRepoInfo"));
        assert!(sdl.contains("user(login: String!): UserInfo"));
    }

    #[test]
    fn test_relational_field_types() {
        let sdl = HubSchemaBuilder::default().build().unwrap().sdl();

        assert!(sdl.contains("repos: [DetailedRepoInfo]"));
        assert!(sdl.contains("starred_repos: [DetailedRepoInfo]"));
        assert!(sdl.contains("owner: OwnerRepoInfo"));
    }

    #[tokio::test]
    async fn test_field_arguments_via_introspection() {
        let schema = HubSchemaBuilder::default().build().unwrap();
        let response = schema
            .execute(
                r#"{
                    __type(name: "OwnerRepoInfo") {
                        fields { name args { name defaultValue } type { name ofType { name } } }
                    }
                }"#,
            )
            .await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);

        let data = response.data.into_json().unwrap();
        let fields = data["__type"]["fields"].as_array().unwrap();
        let field = |name: &str| {
            fields
                .iter()
                .find(|f| f["name"] == name)
                .unwrap_or_else(|| panic!("missing field {name}"))
                .clone()
        };

        let following = field("users_following");
        assert_eq!(following["args"][0]["name"], "page");
        assert_eq!(following["args"][0]["defaultValue"], "1");
        assert_eq!(following["type"]["ofType"]["name"], "OwnerRepoInfo");

        let followers = field("user_followers");
        assert_eq!(followers["args"][0]["defaultValue"], "1");

        let following_url = field("following_url");
        assert_eq!(following_url["args"][0]["name"], "user");
        assert!(following_url["args"][0]["defaultValue"].is_null());
        assert_eq!(following_url["type"]["name"], "OwnerRepoInfo");
    }

    #[tokio::test]
    async fn test_introspection_can_be_disabled() {
        let schema = HubSchemaBuilder::new(SchemaBuilderConfig {
            introspection_enabled: false,
            ..Default::default()
        })
        .build()
        .unwrap();

        let response = schema.execute("{ __schema { queryType { name } } }").await;
        assert!(!response.errors.is_empty());
    }
}
