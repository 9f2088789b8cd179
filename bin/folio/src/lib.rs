//! Folio CLI Library
//!
//! Command implementations behind the `folio` binary. The binary only parses
//! arguments; everything else lives here so it can be exercised from tests.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (check, new, config)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let config = folio::load_config(None).unwrap();
//! folio::cmd::check::run(&config, Path::new("src/content"), false).unwrap();
//! ```

pub mod cmd;

use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
// Re-export core types for convenience
pub use folio_collector::{CollectionSet, ContentCollector};
pub use folio_core::{Collection, Config, Entry};

/// Configuration file read when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "folio.toml";

/// Load the site configuration once for the whole run.
///
/// An explicit path must exist; the default path is optional and falls back
/// to the built-in site settings. `FOLIO__*` environment variables apply in
/// both cases.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load_with_env(path, true),
        None => Config::load_with_env(Path::new(DEFAULT_CONFIG_FILE), false),
    }
    .wrap_err("Failed to load configuration")?;

    tracing::debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
