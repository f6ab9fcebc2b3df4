//! Tracing setup for the `codemod` binary.
//!
//! The filter comes from `CODEMOD_LOG`, falling back to `RUST_LOG`, and
//! defaults to `warn` so per-file failures are always visible. Output goes
//! to stderr; stdout is reserved for `--print` and `--json`.

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CODEMOD_LOG";

fn build_filter(verbose: bool) -> EnvFilter {
    if let Ok(val) = std::env::var(LOG_ENV) {
        return EnvFilter::builder().parse_lossy(val);
    }
    if std::env::var("RUST_LOG").is_ok() {
        return EnvFilter::from_default_env();
    }
    EnvFilter::new(if verbose { "info" } else { "warn" })
}

pub fn init_tracing(verbose: bool) {
    // A second init (e.g. from tests) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
