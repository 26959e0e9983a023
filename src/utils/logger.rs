use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static LOGGER_INIT: OnceLock<()> = OnceLock::new();

const DEFAULT_LOG_DIRECTIVES: &str = "warn,rpunchcard::core=info";

/// Install the stderr diagnostics subscriber. `RUST_LOG` overrides the
/// default directives. Safe to call more than once.
pub fn init_logging() {
    LOGGER_INIT.get_or_init(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init();
    });
}
