//! Logging infrastructure.
//!
//! Two layers with different audiences:
//! - `tracing` for diagnostics, initialized once via [`init_tracing`].
//! - [`RunReporter`] for the user-facing console readout (and the GUI
//!   log panel, through an optional callback).

mod reporter;

pub use reporter::{GuiLogCallback, RunReporter};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Respects `RUST_LOG`, falling back to `info`. Diagnostics go to
/// stderr so the reporter keeps stdout to itself. Should be called once
/// at application startup.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .with(filter)
        .init();
}
