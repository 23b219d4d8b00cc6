//! JSON API routes
//!
//! All handler failures converge on [`ApiError`]: one `IntoResponse` impl
//! logs the underlying error and emits a generic JSON body, so internal
//! detail never reaches the caller beyond the message text.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use tracing::{error, warn};
use uuid::Uuid;

use inkpost_common::{Error, NewPost, Post};

use crate::middleware::RequestContext;
use crate::server::AppState;

/// API error variants mapped to JSON responses.
#[derive(Debug)]
pub enum ApiError {
    Validation(&'static str),
    NotFound,
    Internal(Error),
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound { .. } => Self::NotFound,
            other => Self::Internal(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.to_string()),
            Self::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            Self::Internal(err) => {
                error!(error = %err, "unhandled error while processing request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Echo payload for the trace fixture route.
#[derive(Debug, Serialize)]
pub struct TraceResponse {
    pub traced: bool,
    pub request_id: Uuid,
}

/// Build the `/api` router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/:id", get(get_post))
        .route("/trace", get(trace))
}

async fn list_posts(State(state): State<AppState>) -> Result<Json<Vec<Post>>, ApiError> {
    let posts = state.store.list_posts()?;
    Ok(Json(posts))
}

async fn create_post(
    State(state): State<AppState>,
    Json(new_post): Json<NewPost>,
) -> Result<(StatusCode, Json<Post>), ApiError> {
    validate_new_post(&new_post)?;
    let post = state.store.insert_post(new_post)?;
    Ok((StatusCode::CREATED, Json(post)))
}

async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Post>, ApiError> {
    let post = state.store.get_post(id)?;
    Ok(Json(post))
}

/// Terminal stage of the middleware fixture: echoes the context the
/// request-context stage attached upstream.
async fn trace(Extension(ctx): Extension<RequestContext>) -> Json<TraceResponse> {
    Json(TraceResponse {
        traced: ctx.traced,
        request_id: ctx.request_id,
    })
}

pub(crate) fn validate_new_post(new_post: &NewPost) -> Result<(), ApiError> {
    if new_post.title.trim().is_empty() {
        warn!("rejected post with empty title");
        return Err(ApiError::Validation("title must not be empty"));
    }
    Ok(())
}
