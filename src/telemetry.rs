//! Logging setup.
//!
//! Like counters (`likes_toggled_total`, `likes_toggle_retries_total`,
//! `likes_toggle_failures_total`) go through the `metrics` facade and are
//! discarded until a recorder is installed with `metrics::set_global_recorder`.
//! No exporter is bundled; a deployment that scrapes metrics installs its own
//! before calling [`crate::server::run`].

use tracing_subscriber::EnvFilter;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `default_level`. `format` is `text` or `json`.
pub fn init(default_level: &str, format: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if format == "json" {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    if let Err(e) = result {
        eprintln!("Logger already initialised: {e}");
    }
}
