//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::constants::LOG_ENV_VAR;

const DEFAULT_FILTER: &str = "info";

/// Picks the filter directive: explicit, then `HALO_LOG`, then `RUST_LOG`.
fn filter_directive(
    explicit: Option<&str>,
    halo_log: Option<String>,
    rust_log: Option<String>,
) -> String {
    explicit
        .map(str::to_string)
        .into_iter()
        .chain(halo_log)
        .chain(rust_log)
        .find(|directive| !directive.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|err| {
        eprintln!("halo: warning: invalid log filter '{directive}': {err}");
        EnvFilter::new(DEFAULT_FILTER)
    })
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(explicit: Option<&str>) {
    let directive = filter_directive(
        explicit,
        std::env::var(LOG_ENV_VAR).ok(),
        std::env::var("RUST_LOG").ok(),
    );

    let _ = tracing_subscriber::fmt().with_env_filter(build_filter(&directive)).try_init();
}
