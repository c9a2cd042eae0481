use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

static TRACING_INIT: Once = Once::new();

const DEFAULT_DIRECTIVE: &str = "tillbook=warn";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env("TILLBOOK_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init() {
    TRACING_INIT.call_once(|| {
        let _ = fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
