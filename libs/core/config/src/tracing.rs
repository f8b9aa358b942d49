//! Tracing subscriber and error-report setup.

use crate::Environment;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Install the color-eyre panic and error hooks.
///
/// Call at the very top of main, before anything can fail, so every report
/// comes out formatted. Repeated calls are ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

fn default_filter(environment: &Environment) -> EnvFilter {
    if environment.is_production() {
        EnvFilter::new("info,tower_http=info,sea_orm=warn")
    } else {
        EnvFilter::new("debug")
    }
}

/// Initialize the global tracing subscriber.
///
/// Production emits flattened JSON lines for log shipping; development gets
/// the pretty human-readable format. `RUST_LOG` overrides the default
/// filter. Both modes register `tracing_error::ErrorLayer` so eyre reports
/// carry span traces.
///
/// A second call is a no-op, which keeps tests that share a process happy.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(environment));

    let initialized = if environment.is_production() {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .flatten_event(true)
                    .with_target(false),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .pretty()
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(tracing_error::ErrorLayer::default())
            .with(filter)
            .try_init()
    };

    if initialized.is_ok() {
        tracing::info!(?environment, "Tracing initialized");
    }
}
