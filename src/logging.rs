use tracing_subscriber::EnvFilter;

/// Install a fmt subscriber filtered by `HMMER_LOG` (default `info`)
///
/// Returns `false` when a global subscriber was already installed.
pub fn init_logging() -> bool {
    let log_level = std::env::var("HMMER_LOG").unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&log_level))
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}
