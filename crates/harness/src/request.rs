//! Synthetic request dispatch
//!
//! Drives a router in-process through `tower::ServiceExt::oneshot` and
//! captures the response. No network listener is opened; a pipeline failure
//! surfaces as a [`HarnessError`] instead of hanging the test.

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tower::ServiceExt;

#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Failed to build request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Failed to parse response as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response body is not UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// A described request: method, path, optional JSON body.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub body: Option<serde_json::Value>,
    pub form: Option<String>,
}

impl RequestSpec {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            body: None,
            form: None,
        }
    }

    pub fn post(path: impl Into<String>, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: Some(body),
            form: None,
        }
    }

    /// Form-encoded POST, as a browser submits it.
    pub fn post_form(path: impl Into<String>, form: impl Into<String>) -> Self {
        Self {
            method: Method::POST,
            path: path.into(),
            body: None,
            form: Some(form.into()),
        }
    }

    fn into_request(self) -> Result<Request<Body>, HarnessError> {
        let builder = Request::builder().method(self.method).uri(self.path);
        let request = if let Some(json) = self.body {
            builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&json)?))?
        } else if let Some(form) = self.form {
            builder
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form))?
        } else {
            builder.body(Body::empty())?
        };
        Ok(request)
    }
}

/// The captured output of one dispatch.
#[derive(Debug)]
pub struct CapturedResponse {
    pub status: StatusCode,
    pub bytes: Bytes,
    /// Location header, when the pipeline answered with a redirect.
    pub location: Option<String>,
}

impl CapturedResponse {
    /// Parse the body as JSON into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HarnessError> {
        Ok(serde_json::from_slice(&self.bytes)?)
    }

    /// Parse the body as a loose JSON value.
    pub fn json_value(&self) -> Result<serde_json::Value, HarnessError> {
        self.json()
    }

    /// The body as text.
    pub fn text(&self) -> Result<String, HarnessError> {
        Ok(String::from_utf8(self.bytes.to_vec())?)
    }
}

/// Dispatch one described request into the router and capture the response.
pub async fn dispatch(
    router: Router,
    spec: RequestSpec,
) -> Result<CapturedResponse, HarnessError> {
    let request = spec.into_request()?;

    // Router's service error is Infallible; handler panics become 500s
    // inside axum rather than propagating here.
    let response = match router.oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    };

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .map_err(|e| HarnessError::Body(e.to_string()))?;

    Ok(CapturedResponse {
        status,
        bytes,
        location,
    })
}
