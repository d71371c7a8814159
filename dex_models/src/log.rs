use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt as _};

/// Installs the global JSON subscriber. `RUST_LOG` drives the filter.
pub fn init_tracing(prod_format: bool) {
    if prod_format {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().json().flatten_event(true).with_ansi(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(EnvFilter::from_default_env())
            .with(fmt::layer().json().pretty().with_ansi(true))
            .init();
    }
}

/// Same as [`init_tracing`] but tolerates a subscriber that is already set,
/// so it can be called from every test.
pub fn try_init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().json().pretty().with_ansi(true))
        .try_init()
        .ok();
}
