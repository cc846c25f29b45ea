//! Axum HTTP handlers for the GraphQL endpoint.
//!
//! - `POST /graphql` - JSON body
//! - `GET /graphql` - query, operation name and variables as URL parameters
//!
//! Field-level failures never change the HTTP status: they travel in the
//! `errors` array of a 200 response. Only failures that stop the query from
//! running at all (schema not ready, unreadable request) map to 4xx/5xx.

use std::sync::Arc;

use async_graphql::{Request, Response, Variables};
use axum::Json;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response as HttpResponse};
use hubql_upstream::DynUpstream;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use url::Url;

use crate::context::{ContextBuilderError, GraphQLContext, GraphQLContextBuilder};
use crate::error::GraphQLError;
use crate::schema::LazySchema;

/// Header carrying the correlation id set by the request-id middleware.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// State shared across GraphQL handlers.
#[derive(Clone)]
pub struct GraphQLState {
    /// Lazy-loaded GraphQL schema.
    pub lazy_schema: Arc<LazySchema>,

    /// Upstream client handed to every request context.
    pub upstream: DynUpstream,

    /// Base URL for the query root lookups.
    pub api_base: Url,
}

/// GraphQL request body.
#[derive(Debug, Deserialize)]
pub struct GraphQLRequest {
    /// The GraphQL query string.
    pub query: String,

    /// Optional operation name for multi-operation documents.
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,

    /// Optional variables for the query.
    pub variables: Option<serde_json::Value>,
}

/// Query parameters for GET requests.
#[derive(Debug, Deserialize)]
pub struct GraphQLQueryParams {
    /// The GraphQL query string.
    pub query: Option<String>,

    /// Optional operation name.
    #[serde(rename = "operationName")]
    pub operation_name: Option<String>,

    /// Optional variables (JSON string).
    pub variables: Option<String>,
}

/// Wire shape of a GraphQL response.
#[derive(Debug, Serialize)]
pub struct GraphQLResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<serde_json::Value>,
}

impl From<Response> for GraphQLResponse {
    fn from(resp: Response) -> Self {
        let data = serde_json::to_value(&resp.data)
            .ok()
            .filter(|value| !value.is_null());

        // ServerError serializes as {message, locations, path, extensions}
        let errors = resp
            .errors
            .iter()
            .map(|e| serde_json::to_value(e).unwrap_or(serde_json::Value::Null))
            .collect();

        let extensions = if resp.extensions.is_empty() {
            None
        } else {
            serde_json::to_value(&resp.extensions).ok()
        };

        Self {
            data,
            errors,
            extensions,
        }
    }
}

/// Handles `POST /graphql`.
pub async fn graphql_handler(
    State(state): State<GraphQLState>,
    headers: HeaderMap,
    Json(request): Json<GraphQLRequest>,
) -> impl IntoResponse {
    debug!("Processing GraphQL request");
    execute_graphql(state, headers, request).await
}

/// Handles `GET /graphql`.
pub async fn graphql_handler_get(
    State(state): State<GraphQLState>,
    headers: HeaderMap,
    Query(params): Query<GraphQLQueryParams>,
) -> impl IntoResponse {
    let request = match params_to_request(params) {
        Ok(req) => req,
        Err(e) => return error_response(e),
    };

    debug!("Processing GraphQL GET request");
    execute_graphql(state, headers, request).await
}

/// Checks if a GraphQL query is an introspection query.
fn is_introspection_query(query: &str) -> bool {
    query.contains("__schema") || query.contains("__type") || query.contains("IntrospectionQuery")
}

/// Executes a GraphQL request.
async fn execute_graphql(
    state: GraphQLState,
    headers: HeaderMap,
    request: GraphQLRequest,
) -> HttpResponse {
    // Introspection waits for an in-flight build, everything else gets a 503
    let schema = if is_introspection_query(&request.query) {
        debug!("Introspection query detected, waiting for schema build if needed");
        state.lazy_schema.get_or_build_wait().await
    } else {
        state.lazy_schema.get_or_build().await
    };
    let schema = match schema {
        Ok(schema) => schema,
        Err(e) => {
            if !matches!(e, GraphQLError::SchemaInitializing) {
                warn!(error = %e, "Schema build failed");
            }
            return error_response(e);
        }
    };

    let request_id = headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let context = match build_context(&state, request_id) {
        Ok(ctx) => ctx,
        Err(e) => return error_response(GraphQLError::Internal(e.to_string())),
    };

    let mut gql_request = Request::new(&request.query);

    if let Some(op_name) = request.operation_name {
        gql_request = gql_request.operation_name(op_name);
    }

    if let Some(vars) = request.variables {
        gql_request = gql_request.variables(Variables::from_json(vars));
    }

    let request_id = context.request_id.clone();
    gql_request = gql_request.data(context);

    debug!(request_id = %request_id, query = %request.query, "Executing GraphQL query");
    let response = schema.execute(gql_request).await;
    if response.is_err() {
        debug!(
            request_id = %request_id,
            errors = response.errors.len(),
            "GraphQL query completed with errors"
        );
    }

    (StatusCode::OK, Json(GraphQLResponse::from(response))).into_response()
}

/// Builds the per-request context from the shared state.
fn build_context(
    state: &GraphQLState,
    request_id: String,
) -> Result<GraphQLContext, ContextBuilderError> {
    GraphQLContextBuilder::new()
        .with_upstream(state.upstream.clone())
        .with_api_base(state.api_base.clone())
        .with_request_id(request_id)
        .build()
}

/// Converts GET query params to a GraphQL request.
fn params_to_request(params: GraphQLQueryParams) -> Result<GraphQLRequest, GraphQLError> {
    let query = params
        .query
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| GraphQLError::InvalidQuery("missing 'query' parameter".to_string()))?;

    let variables = params
        .variables
        .map(|vars| serde_json::from_str(&vars))
        .transpose()
        .map_err(|e| GraphQLError::InvalidQuery(format!("variables are not valid JSON: {e}")))?;

    Ok(GraphQLRequest {
        query,
        operation_name: params.operation_name,
        variables,
    })
}

/// Converts a request-level error into an HTTP response.
fn error_response(error: GraphQLError) -> HttpResponse {
    let status =
        StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = (status, Json(error.to_response_body())).into_response();
    if let Some(seconds) = error.retry_after() {
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(seconds));
    }
    response
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use hubql_upstream::{UpstreamClient, UpstreamError};
    use serde_json::json;

    use super::*;
    use crate::schema::HubSchemaBuilder;

    struct FixedUpstream;

    #[async_trait]
    impl UpstreamClient for FixedUpstream {
        async fn get_json(&self, url: &str) -> Result<serde_json::Value, UpstreamError> {
            match url {
                "https://api.github.com/users/octocat" => Ok(json!({
                    "login": "octocat",
                    "id": 583231,
                    "site_admin": false
                })),
                _ => Err(UpstreamError::status(url, 404)),
            }
        }
    }

    fn state() -> GraphQLState {
        GraphQLState {
            lazy_schema: Arc::new(LazySchema::new(HubSchemaBuilder::default())),
            upstream: Arc::new(FixedUpstream),
            api_base: Url::parse("https://api.github.com").unwrap(),
        }
    }

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[test]
    fn test_graphql_request_deserialize() {
        let json = r#"{
            "query": "query Who($login: String!) { user(login: $login) { login } }",
            "operationName": "Who",
            "variables": {"login": "octocat"}
        }"#;

        let request: GraphQLRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.operation_name, Some("Who".to_string()));
        assert!(request.variables.is_some());
    }

    #[test]
    fn test_graphql_request_minimal() {
        let request: GraphQLRequest =
            serde_json::from_str(r#"{"query": "{ user(login: \"a\") { id } }"}"#).unwrap();
        assert!(request.operation_name.is_none());
        assert!(request.variables.is_none());
    }

    #[test]
    fn test_params_to_request() {
        let params = GraphQLQueryParams {
            query: Some("{ user(login: $login) { id } }".to_string()),
            operation_name: Some("Who".to_string()),
            variables: Some(r#"{"login": "octocat"}"#.to_string()),
        };

        let request = params_to_request(params).unwrap();
        assert_eq!(request.operation_name, Some("Who".to_string()));
        assert_eq!(request.variables, Some(json!({"login": "octocat"})));
    }

    #[test]
    fn test_params_to_request_missing_query() {
        let params = GraphQLQueryParams {
            query: None,
            operation_name: None,
            variables: None,
        };

        assert!(matches!(
            params_to_request(params),
            Err(GraphQLError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_params_to_request_invalid_variables() {
        let params = GraphQLQueryParams {
            query: Some("{ user(login: \"a\") { id } }".to_string()),
            operation_name: None,
            variables: Some("not valid json".to_string()),
        };

        assert!(matches!(
            params_to_request(params),
            Err(GraphQLError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_introspection_detection() {
        assert!(is_introspection_query("{ __schema { types { name } } }"));
        assert!(is_introspection_query("query IntrospectionQuery { a }"));
        assert!(!is_introspection_query("{ user(login: \"a\") { login } }"));
    }

    #[tokio::test]
    async fn test_initializing_response_has_retry_after() {
        let response = error_response(GraphQLError::SchemaInitializing);

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.headers()[header::RETRY_AFTER], "5");

        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["extensions"]["code"], "SCHEMA_INITIALIZING");
    }

    #[tokio::test]
    async fn test_invalid_query_is_bad_request() {
        let response = error_response(GraphQLError::InvalidQuery("boom".to_string()));

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get(header::RETRY_AFTER).is_none());
    }

    #[tokio::test]
    async fn test_post_executes_query() {
        let request = GraphQLRequest {
            query: r#"{ user(login: "octocat") { login id site_admin } }"#.to_string(),
            operation_name: None,
            variables: None,
        };

        let response = graphql_handler(State(state()), HeaderMap::new(), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(
            body["data"]["user"],
            json!({"login": "octocat", "id": 583231, "site_admin": false})
        );
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_field_errors_keep_status_ok() {
        let request = GraphQLRequest {
            query: r#"{ user(login: "ghost") { login } }"#.to_string(),
            operation_name: None,
            variables: None,
        };

        let response = graphql_handler(State(state()), HeaderMap::new(), Json(request))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert!(body["data"]["user"].is_null());
        assert_eq!(body["errors"][0]["extensions"]["code"], "UPSTREAM_FETCH_ERROR");
        assert_eq!(body["errors"][0]["path"], json!(["user"]));
    }

    #[tokio::test]
    async fn test_get_with_variables() {
        let params = GraphQLQueryParams {
            query: Some("query Who($login: String!) { user(login: $login) { login } }".to_string()),
            operation_name: Some("Who".to_string()),
            variables: Some(r#"{"login": "octocat"}"#.to_string()),
        };

        let response = graphql_handler_get(State(state()), HeaderMap::new(), Query(params))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["data"]["user"]["login"], "octocat");
    }
}
