use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

fn filter_from_env() -> EnvFilter {
    EnvFilter::try_from_env("VIDSUM_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Diagnostics go to stderr so stdout stays clean for reports and JSON.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("vidsum=debug")
    } else {
        filter_from_env()
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
