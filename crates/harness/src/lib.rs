//! Inkpost Test Harness
//!
//! Infrastructure for exercising the application without its production
//! environment:
//! - [`request`]: synthetic request dispatch into an axum router, no socket
//! - [`store`]: disposable-store lifecycle guard for test groups
//! - [`render`]: render boundary capturing failures as a static fallback
//! - [`fixtures`]: the trivial fixtures used by the unit-test examples

pub mod fixtures;
pub mod render;
pub mod request;
pub mod store;

pub use render::{RenderBoundary, RenderError, RenderOutcome};
pub use request::{dispatch, CapturedResponse, HarnessError, RequestSpec};
pub use store::TestStore;
