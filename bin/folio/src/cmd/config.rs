//! Config command - print the resolved configuration

use color_eyre::eyre::{Result, WrapErr};
use folio_core::Config;

/// Render the configuration as TOML.
pub fn render(config: &Config) -> Result<String> {
    toml::to_string_pretty(config).wrap_err("Failed to serialize configuration")
}

/// Run the config command.
pub fn run(config: &Config) -> Result<()> {
    print!("{}", render(config)?);
    Ok(())
}
