// Library root. Exposes internal modules so the integration tests in
// `tests/` can drive the full pipeline; the production entry point is
// `src/main.rs`.

pub mod alerts;
pub mod booking;
pub mod error;
pub mod orchestrator;
pub mod services;

// These modules are only needed by the binary and the test harness.
pub mod cli;
pub mod config;
pub mod logging;
