use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, middleware, routing::get};
use hubql_graphql::{GraphQLState, HubSchemaBuilder, LazySchema, graphql_handler, graphql_handler_get};
use hubql_upstream::{ReqwestUpstream, UpstreamError};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{config::AppConfig, handlers, middleware as app_middleware};

/// Errors raised while assembling the application.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("failed to create upstream client: {0}")]
    Upstream(#[from] UpstreamError),
}

/// State shared by the health handlers.
#[derive(Clone, Default)]
pub struct AppState {
    /// `None` when the GraphQL endpoint is disabled.
    pub lazy_schema: Option<Arc<LazySchema>>,
}

pub struct HubqlServer {
    addr: SocketAddr,
    app: Router,
    lazy_schema: Option<Arc<LazySchema>>,
}

/// Builds the GraphQL state from configuration, or `None` when disabled.
pub fn build_graphql_state(cfg: &AppConfig) -> Result<Option<GraphQLState>, ServerError> {
    if !cfg.graphql.enabled {
        tracing::info!("GraphQL endpoint disabled");
        return Ok(None);
    }

    let api_base = cfg.github.api_base_url().map_err(ServerError::Config)?;
    let upstream = Arc::new(ReqwestUpstream::new(&cfg.github)?);
    let builder = HubSchemaBuilder::new((&cfg.graphql).into());

    Ok(Some(GraphQLState {
        lazy_schema: Arc::new(LazySchema::new(builder)),
        upstream,
        api_base,
    }))
}

pub fn build_app(cfg: &AppConfig) -> Result<Router, ServerError> {
    let graphql = build_graphql_state(cfg)?;
    Ok(router(cfg, graphql))
}

fn router(cfg: &AppConfig, graphql: Option<GraphQLState>) -> Router {
    let body_limit = cfg.server.body_limit_bytes;
    let state = AppState {
        lazy_schema: graphql.as_ref().map(|g| Arc::clone(&g.lazy_schema)),
    };

    let mut app = Router::new()
        // Health and info endpoints
        .route("/", get(handlers::root))
        .route("/healthz", get(handlers::healthz))
        .route("/readyz", get(handlers::readyz))
        .with_state(state);

    if let Some(graphql) = graphql {
        app = app.merge(
            Router::new()
                .route("/graphql", get(graphql_handler_get).post(graphql_handler))
                .with_state(graphql),
        );
    }

    // Middleware stack, outermost last: request id -> trace -> cors/compression -> body limit
    app.layer(axum::extract::DefaultBodyLimit::max(body_limit))
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    use tracing::field::Empty;
                    let req_id = req
                        .extensions()
                        .get::<axum::http::HeaderValue>()
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("")
                        .to_string();
                    tracing::info_span!(
                        "http.request",
                        http.method = %req.method(),
                        http.target = %req.uri(),
                        http.status_code = Empty,
                        request_id = %req_id
                    )
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record(
                            "http.status_code",
                            tracing::field::display(res.status().as_u16()),
                        );
                        tracing::info!(
                            http.status = %res.status().as_u16(),
                            elapsed_ms = %latency.as_millis(),
                            "request handled"
                        );
                    },
                ),
        )
        .layer(middleware::from_fn(app_middleware::request_id))
}

pub struct ServerBuilder {
    addr: SocketAddr,
    config: AppConfig,
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerBuilder {
    pub fn new() -> Self {
        let cfg = AppConfig::default();
        Self {
            addr: cfg.addr(),
            config: cfg,
        }
    }

    pub fn with_addr(mut self, addr: SocketAddr) -> Self {
        self.addr = addr;
        self
    }

    pub fn with_config(mut self, cfg: AppConfig) -> Self {
        self.addr = cfg.addr();
        self.config = cfg;
        self
    }

    pub fn build(self) -> Result<HubqlServer, ServerError> {
        let graphql = build_graphql_state(&self.config)?;
        let lazy_schema = graphql.as_ref().map(|g| Arc::clone(&g.lazy_schema));
        let app = router(&self.config, graphql);

        Ok(HubqlServer {
            addr: self.addr,
            app,
            lazy_schema,
        })
    }
}

impl HubqlServer {
    pub async fn run(self) -> anyhow::Result<()> {
        // Warm the schema so the first query does not see a 503
        if let Some(lazy_schema) = self.lazy_schema {
            tokio::spawn(async move {
                if let Err(e) = lazy_schema.get_or_build_wait().await {
                    tracing::warn!(error = %e, "GraphQL schema warm-up failed");
                }
            });
        }

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        tracing::info!("listening on {}", self.addr);
        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
