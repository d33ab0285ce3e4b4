// Library surface shared by the binary and the integration tests.
pub mod app;
pub mod app_dirs;
pub mod clock;
pub mod config;
pub mod error;
pub mod language;
pub mod ledger;
pub mod logging;
pub mod metrics;
pub mod picker;
pub mod router;
pub mod runtime;
pub mod session;
pub mod source;
pub mod ui;
