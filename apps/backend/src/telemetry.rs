use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// JSON logs on stdout. `RUST_LOG` overrides the default filter, which
/// keeps wicket's own guard decisions visible while muting query noise.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wicket=debug,sqlx=warn,sea_orm=warn"));

    let fmt_layer = fmt::layer().with_target(true).with_ansi(false).json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
