//! Tracing subscriber bootstrap shared by the server and the CLI.

use bookclub_kernel::settings::{LogFormat, TelemetrySettings};
use tracing_subscriber::EnvFilter;

/// Build the filter: `RUST_LOG` when set, otherwise the configured directives.
fn env_filter(settings: &TelemetrySettings) -> anyhow::Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&settings.filter).map_err(|error| {
            anyhow::anyhow!("invalid telemetry filter '{}': {error}", settings.filter)
        }),
    }
}

/// Install the global subscriber.
///
/// Returns `Ok(false)` when a subscriber was already installed, which happens
/// in tests and when the CLI embeds the server.
pub fn init(settings: &TelemetrySettings) -> anyhow::Result<bool> {
    let filter = env_filter(settings)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init().is_ok(),
        LogFormat::Json => builder.json().try_init().is_ok(),
    };

    if installed {
        tracing::debug!(
            target: "bookclub-telemetry",
            format = ?settings.log_format,
            "telemetry initialized"
        );
    }
    Ok(installed)
}
