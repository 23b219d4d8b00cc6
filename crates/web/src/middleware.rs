//! Request-context middleware
//!
//! The first pipeline stage attaches an immutable [`RequestContext`] to each
//! incoming request. Later stages and terminal handlers read it through the
//! request extensions; nothing mutates it after insertion, so the value can
//! never leak across requests.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;
use uuid::Uuid;

/// Per-request context, inserted once at the head of the pipeline.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Correlates log lines for one dispatch.
    pub request_id: Uuid,
    /// Set when the request passed through the tracing stage.
    pub traced: bool,
    /// When the pipeline first saw the request.
    pub started: Instant,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            traced: true,
            started: Instant::now(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Head-of-pipeline stage: build the context, hand the request on, then log
/// the completed dispatch.
pub async fn request_context(mut request: Request, next: Next) -> Response {
    let ctx = RequestContext::new();
    let request_id = ctx.request_id;
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let started = ctx.started;

    request.extensions_mut().insert(ctx);

    let response = next.run(request).await;

    info!(
        %request_id,
        %method,
        %path,
        status = %response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}
