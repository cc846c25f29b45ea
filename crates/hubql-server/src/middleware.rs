use axum::{
    body::Body,
    http::{HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use hubql_graphql::handler::REQUEST_ID_HEADER;
use uuid::Uuid;

/// Propagates the caller's `x-request-id` or assigns a fresh UUID.
///
/// The id is written back onto the request headers so handlers can read it,
/// stored in the request extensions for the trace span, and echoed on the
/// response.
pub async fn request_id(mut req: Request<Body>, next: Next) -> Response {
    let header_name = HeaderName::from_static(REQUEST_ID_HEADER);

    let req_id_value = match req.headers().get(&header_name) {
        Some(value) => value.clone(),
        None => {
            let generated = HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
            req.headers_mut()
                .insert(header_name.clone(), generated.clone());
            generated
        }
    };

    req.extensions_mut().insert(req_id_value.clone());

    let mut res = next.run(req).await;
    res.headers_mut().insert(header_name, req_id_value);
    res
}
