use crate::Environment;
use tracing::{debug, info};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Filter used when `RUST_LOG` is unset.
const PRODUCTION_FILTER: &str = "info,tower_http=info,mongodb=warn,reqwest=warn";
const DEVELOPMENT_FILTER: &str = "debug,mongodb=info,hyper=info,reqwest=info";

/// Install the color-eyre panic and report hooks.
///
/// Error reports carry the source location; the environment section is
/// left out. A second install is ignored.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

fn default_filter(environment: &Environment) -> &'static str {
    if environment.is_production() {
        PRODUCTION_FILTER
    } else {
        DEVELOPMENT_FILTER
    }
}

/// Install the global subscriber.
///
/// Production emits flattened JSON lines without targets; everything else gets
/// the pretty formatter. Both capture span traces through `ErrorLayer`, so
/// `eyre` reports show which request or upload was in flight.
///
/// `RUST_LOG` replaces the default filter, e.g.
/// `RUST_LOG=domain_catalog=trace,tower_http=debug`.
///
/// Later calls are no-ops, which keeps tests that share a process happy.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));

    let registry = tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(filter);

    let result = if environment.is_production() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init()
    };

    match result {
        Ok(()) => info!(environment = ?environment, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized"),
    }
}
