use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the global fmt subscriber once; `RUST_LOG` overrides `default_directive`.
pub fn init_logging(default_directive: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    });
}
