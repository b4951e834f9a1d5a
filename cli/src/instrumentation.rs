use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Logs go to stderr so that command output on stdout stays parseable.
pub fn init_instrumentation(verbose: bool) {
    INIT.call_once(|| {
        let filter = if verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        let result = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_level(true)
            .with_writer(std::io::stderr)
            .try_init();

        if let Err(err) = result {
            eprintln!("Failed to set tracing subscriber: {err}");
        }
    });
}
