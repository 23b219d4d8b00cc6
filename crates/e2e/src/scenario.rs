//! Declarative YAML scenarios
//!
//! A scenario is an ordered list of user actions and assertions; each
//! assertion gates the next action, so a scenario encodes a small state
//! machine over the rendered application.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::E2eResult;

/// A complete scenario parsed from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Unique name for this scenario
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering
    #[serde(default)]
    pub tags: Vec<String>,

    /// Steps to execute in order
    pub steps: Vec<Step>,
}

/// A single step in a scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Navigate to a URL (relative to base)
    Navigate {
        url: String,
        #[serde(default)]
        wait_for_selector: Option<String>,
    },

    /// Fill an input or textarea
    Fill { selector: String, value: String },

    /// Click an element; clicking text uses a text= selector
    Click {
        selector: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Assert visible text, on the whole page or under a selector
    AssertText {
        #[serde(default)]
        selector: Option<String>,
        contains: String,
    },

    /// Assert the current URL contains a fragment
    AssertUrl { contains: String },

    /// Wait for an element to appear
    Wait {
        selector: String,
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
    },

    /// Wait for a fixed amount of time (use sparingly)
    Sleep { ms: u64 },
}

fn default_wait_timeout() -> u64 {
    5000
}

impl Step {
    /// Short label used in failure reports
    pub fn label(&self) -> String {
        match self {
            Step::Navigate { url, .. } => format!("navigate:{}", url),
            Step::Fill { selector, .. } => format!("fill:{}", selector),
            Step::Click { selector, .. } => format!("click:{}", selector),
            Step::AssertText { contains, .. } => format!("assert_text:{}", contains),
            Step::AssertUrl { contains } => format!("assert_url:{}", contains),
            Step::Wait { selector, .. } => format!("wait:{}", selector),
            Step::Sleep { ms } => format!("sleep:{}ms", ms),
        }
    }
}

impl Scenario {
    /// Parse a scenario from a YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a scenario from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Load all scenarios from a directory
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        let mut scenarios = Vec::new();

        for entry in walkdir::WalkDir::new(dir)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path()
                    .extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
        {
            scenarios.push(Self::from_file(entry.path())?);
        }

        Ok(scenarios)
    }

    /// Filter scenarios by tag
    pub fn filter_by_tag<'a>(scenarios: &'a [Self], tag: &str) -> Vec<&'a Self> {
        scenarios
            .iter()
            .filter(|s| s.tags.iter().any(|t| t == tag))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_blog_flow() {
        let yaml = r#"
name: create-post
description: Fill the form and submit
tags:
  - smoke
steps:
  - action: navigate
    url: /
  - action: assert_text
    contains: Posts
  - action: fill
    selector: 'input[name=title]'
    value: New Post
  - action: click
    selector: 'button[type=submit]'
  - action: assert_url
    contains: /posts/
"#;
        let scenario = Scenario::from_yaml(yaml).unwrap();
        assert_eq!(scenario.name, "create-post");
        assert_eq!(scenario.steps.len(), 5);
        assert!(matches!(scenario.steps[1], Step::AssertText { .. }));
    }

    #[test]
    fn test_step_labels() {
        let step = Step::Fill {
            selector: "input[name=title]".to_string(),
            value: "x".to_string(),
        };
        assert_eq!(step.label(), "fill:input[name=title]");
    }

    #[test]
    fn test_filter_by_tag() {
        let yaml = r#"
name: tagged
tags: [smoke]
steps:
  - action: navigate
    url: /
"#;
        let scenarios = vec![Scenario::from_yaml(yaml).unwrap()];
        assert_eq!(Scenario::filter_by_tag(&scenarios, "smoke").len(), 1);
        assert!(Scenario::filter_by_tag(&scenarios, "other").is_empty());
    }

    #[test]
    fn test_unknown_action_is_an_error() {
        let yaml = r#"
name: bad
steps:
  - action: teleport
    url: /
"#;
        assert!(Scenario::from_yaml(yaml).is_err());
    }
}
