//! Scenario runner orchestrating the server and the browser

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

use crate::browser::{BrowserConfig, BrowserHandle};
use crate::error::E2eResult;
use crate::scenario::Scenario;
use crate::server::{ServerConfig, ServerHandle};

/// Result of running a single scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub success: bool,
    pub duration_ms: u64,
    pub error: Option<String>,
}

/// Aggregate result of a suite run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteResult {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: Vec<ScenarioResult>,
}

impl SuiteResult {
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Configuration for the runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub server: ServerConfig,
    pub browser: crate::browser::Browser,
    pub headless: bool,
    pub scenarios_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            browser: crate::browser::Browser::default(),
            headless: true,
            scenarios_dir: PathBuf::from("crates/e2e/scenarios"),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

/// Orchestrates one suite run: server up, scenarios through the browser,
/// results out.
pub struct Runner {
    config: RunnerConfig,
    server: Option<ServerHandle>,
}

impl Runner {
    pub fn new(config: RunnerConfig) -> Self {
        Self {
            config,
            server: None,
        }
    }

    /// Spawn the server and run every given scenario in order.
    ///
    /// A failing scenario is recorded and the suite moves on; only server
    /// startup failure aborts the run.
    pub async fn run(&mut self, scenarios: &[&Scenario]) -> E2eResult<SuiteResult> {
        let server = ServerHandle::spawn(self.config.server.clone()).await?;
        let browser = BrowserHandle::new(BrowserConfig {
            base_url: server.base_url().to_string(),
            browser: self.config.browser,
            headless: self.config.headless,
        })?;
        self.server = Some(server);

        let mut results = Vec::new();
        for scenario in scenarios {
            info!(scenario = %scenario.name, "Running scenario");
            let start = Instant::now();

            let outcome = browser.run_scenario(scenario).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match outcome {
                Ok(()) => results.push(ScenarioResult {
                    name: scenario.name.clone(),
                    success: true,
                    duration_ms,
                    error: None,
                }),
                Err(e) => {
                    error!(scenario = %scenario.name, error = %e, "Scenario failed");
                    results.push(ScenarioResult {
                        name: scenario.name.clone(),
                        success: false,
                        duration_ms,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        let passed = results.iter().filter(|r| r.success).count();
        let suite = SuiteResult {
            total: results.len(),
            passed,
            failed: results.len() - passed,
            results,
        };

        self.stop_server();
        Ok(suite)
    }

    /// Load scenarios from the configured directory.
    pub fn load_scenarios(&self) -> E2eResult<Vec<Scenario>> {
        Scenario::load_all(&self.config.scenarios_dir)
    }

    /// Write suite results to JSON file
    pub fn write_results(&self, results: &SuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }

    fn stop_server(&mut self) {
        if let Some(mut server) = self.server.take() {
            let _ = server.stop();
        }
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        self.stop_server();
    }
}
