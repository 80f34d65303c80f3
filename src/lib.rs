// pagefix - applies the invoice page fixes to a static HTML page

pub mod applier;
pub mod config;
pub mod error;
pub mod fixes;
pub mod patch;
pub mod utils;

pub use applier::{ApplyReport, PatchApplier, SUCCESS_REPORT};
pub use config::{ConfigLoader, PatcherConfig};
pub use error::{PatchError, PatchResult};

use anyhow::Result;
use tracing::debug;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Initialize logging on stderr so stdout only carries the report
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks `debug` over `warn`.
pub fn init_with_logger(verbose: bool) -> Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let default_level = if verbose { "pagefix=debug" } else { "pagefix=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt::Subscriber::builder()
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    debug!("Initializing pagefix v{}", version());
    Ok(())
}
