use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{Error, ErrorKind, Result};

// diagnostics go to stderr so they never mix with the status text.
// RUST_LOG wins when it is set.
pub fn init_logger(verbose: bool) -> Result<()> {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time()
                .compact(),
        )
        .try_init()
        .map_err(|e| {
            Error::new(ErrorKind::Runtime(format!(
                "failed to initialize logger: {}",
                e
            )))
        })?;

    Ok(())
}
