//! Unit-test fixtures
//!
//! Deliberately trivial pieces of code used to demonstrate the unit layer of
//! the harness: a pure function, a renderable component, and a counter.

/// Pure addition.
pub fn add(a: i64, b: i64) -> i64 {
    a + b
}

/// A renderable card for one post title.
#[derive(Debug, Clone)]
pub struct PostCard {
    pub title: String,
    pub excerpt: Option<String>,
}

impl PostCard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            excerpt: None,
        }
    }

    pub fn with_excerpt(mut self, excerpt: impl Into<String>) -> Self {
        self.excerpt = Some(excerpt.into());
        self
    }

    /// Deterministic HTML for fixed inputs.
    pub fn render(&self) -> String {
        match &self.excerpt {
            Some(excerpt) => format!(
                "<div class=\"card\"><h2>{}</h2><p>{}</p></div>",
                self.title, excerpt
            ),
            None => format!("<div class=\"card\"><h2>{}</h2></div>", self.title),
        }
    }
}

/// A counter with explicit state transitions.
#[derive(Debug, Default)]
pub struct Counter {
    count: u64,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self) {
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}
