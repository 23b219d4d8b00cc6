//! Render boundary
//!
//! Wraps a render call and converts failures (errors or panics) into a
//! static fallback instead of letting them propagate. Once a boundary has
//! failed it stays failed for its lifetime; only constructing a new boundary
//! (a remount) renders real content again.

use std::panic::{catch_unwind, AssertUnwindSafe};
use thiserror::Error;
use tracing::warn;

/// Error a render call may return.
#[derive(Error, Debug)]
#[error("render failed: {0}")]
pub struct RenderError(pub String);

/// The result of one render pass through a boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Content rendered normally.
    Rendered(String),
    /// The boundary is in its failed state; carries the fallback text shown
    /// in place of the content.
    Failed(String),
}

impl RenderOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The text a viewer would see.
    pub fn visible_text(&self) -> &str {
        match self {
            Self::Rendered(content) => content,
            Self::Failed(fallback) => fallback,
        }
    }
}

/// A boundary around a render call.
pub struct RenderBoundary {
    fallback: String,
    failure: Option<String>,
}

impl RenderBoundary {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            failure: None,
        }
    }

    /// Why the boundary failed, if it has.
    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Run one render pass. A failed boundary short-circuits to the
    /// fallback without invoking the closure.
    pub fn render<F>(&mut self, render_fn: F) -> RenderOutcome
    where
        F: FnOnce() -> Result<String, RenderError>,
    {
        if self.failure.is_some() {
            return RenderOutcome::Failed(self.fallback.clone());
        }

        match catch_unwind(AssertUnwindSafe(render_fn)) {
            Ok(Ok(content)) => RenderOutcome::Rendered(content),
            Ok(Err(err)) => self.fail(err.to_string()),
            Err(panic) => self.fail(panic_message(panic)),
        }
    }

    fn fail(&mut self, reason: String) -> RenderOutcome {
        warn!(%reason, "render boundary tripped; showing fallback");
        self.failure = Some(reason);
        RenderOutcome::Failed(self.fallback.clone())
    }
}

fn panic_message(panic: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "render panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "Something went wrong.";

    #[test]
    fn test_successful_render_passes_through() {
        let mut boundary = RenderBoundary::new(FALLBACK);
        let outcome = boundary.render(|| Ok("<p>hello</p>".to_string()));
        assert_eq!(outcome, RenderOutcome::Rendered("<p>hello</p>".to_string()));
        assert!(boundary.failure().is_none());
    }

    #[test]
    fn test_error_shows_fallback() {
        let mut boundary = RenderBoundary::new(FALLBACK);
        let outcome = boundary.render(|| Err(RenderError("bad data".to_string())));
        assert_eq!(outcome.visible_text(), FALLBACK);
        assert!(boundary.failure().unwrap().contains("bad data"));
    }

    #[test]
    fn test_panic_shows_fallback() {
        let mut boundary = RenderBoundary::new(FALLBACK);
        let outcome = boundary.render(|| panic!("descendant blew up"));
        assert!(outcome.is_failed());
        assert_eq!(boundary.failure(), Some("descendant blew up"));
    }

    #[test]
    fn test_failed_boundary_stays_failed() {
        let mut boundary = RenderBoundary::new(FALLBACK);
        boundary.render(|| panic!("once"));

        // Later renders would succeed, but the boundary never recovers.
        let outcome = boundary.render(|| Ok("<p>fine now</p>".to_string()));
        assert_eq!(outcome, RenderOutcome::Failed(FALLBACK.to_string()));
    }

    #[test]
    fn test_remount_recovers() {
        let mut boundary = RenderBoundary::new(FALLBACK);
        boundary.render(|| panic!("once"));

        let mut remounted = RenderBoundary::new(FALLBACK);
        let outcome = remounted.render(|| Ok("<p>fresh</p>".to_string()));
        assert_eq!(outcome, RenderOutcome::Rendered("<p>fresh</p>".to_string()));
    }
}
