//! Opt-in log output for hosts and tests.

use std::sync::Once;

use tracing_subscriber::{prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Variable read before `RUST_LOG`.
pub const LOG_ENV: &str = "SCM_LOG";

/// Initialize tracing output.
///
/// Reads the filter from `SCM_LOG`, falling back to `RUST_LOG`, e.g.
/// `SCM_LOG=scm_runtime=trace` to see every binding an installer defines.
/// Does nothing when neither is set, or when the host already installed a
/// global subscriber. Safe to call multiple times.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let Some(filter) = env_filter() else {
            return;
        };
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(
                HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true),
            )
            .try_init();
    });
}

fn env_filter() -> Option<EnvFilter> {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .ok()
}
