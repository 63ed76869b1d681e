// Library target shared by the binary, the integration tests in tests/ and
// the criterion benchmarks.

pub mod app;
pub mod config;
pub mod event;
pub mod logging;
pub mod session;
pub mod store;
pub mod text;
pub mod ui;
