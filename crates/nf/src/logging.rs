use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,nf_core=debug,nf_serve=debug,tower_http=debug";

/// Installs the global subscriber. `RUST_LOG` overrides the default filter.
/// Output goes to stderr so command output on stdout stays machine-readable.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
