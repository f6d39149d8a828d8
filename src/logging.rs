use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Output goes to stderr so report output on stdout stays clean.
pub fn init(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // a subscriber may already be installed (tests); keep it
    let _ = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
