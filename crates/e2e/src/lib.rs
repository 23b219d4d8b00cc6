//! Inkpost E2E Test Framework
//!
//! Drives the real application the way a user would:
//! - Spawns the `inkpost-web` binary against a disposable store
//! - Health-checks it over real HTTP before any scenario runs
//! - Renders declarative YAML scenarios into Playwright scripts and runs
//!   them in a headless browser
//! - Collects per-scenario results and writes a JSON report

pub mod browser;
pub mod error;
pub mod runner;
pub mod scenario;
pub mod server;

pub use error::{E2eError, E2eResult};
pub use runner::{Runner, RunnerConfig, ScenarioResult, SuiteResult};
pub use scenario::{Scenario, Step};
pub use server::{ServerConfig, ServerHandle};
