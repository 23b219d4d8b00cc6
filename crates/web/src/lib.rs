//! Inkpost Web
//!
//! The blog application: a JSON API under `/api`, server-rendered pages for
//! browsing and creating posts, and the request-context middleware the
//! handlers rely on.

pub mod middleware;
pub mod pages;
pub mod routes;
pub mod server;

pub use middleware::RequestContext;
pub use server::{build_router, serve, AppState};
