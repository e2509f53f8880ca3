//! Logging setup shared by the binaries

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// Output always goes to stderr. `RUST_LOG` takes precedence over `debug`.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice() {
        init(true);
        init(false);
        tracing::debug!("logging initialised");
    }
}
