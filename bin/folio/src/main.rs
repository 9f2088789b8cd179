//! Folio CLI
//!
//! Checks and scaffolds the content of the Folio portfolio site.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Content checker for the Folio portfolio site"
)]
struct Cli {
    /// Path to configuration file [default: folio.toml, optional]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Validate every content entry against its collection schema
    Check {
        /// Content directory (overrides content.dir)
        #[arg(long)]
        content: Option<PathBuf>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Create a new content entry from template
    New {
        /// Collection to add the entry to (projects, store)
        collection: String,
        /// File name for the entry (e.g., my-project)
        name: PathBuf,
        /// Entry title (defaults to the file name)
        #[arg(short, long)]
        title: Option<String>,
        /// Content directory (overrides content.dir)
        #[arg(long)]
        content: Option<PathBuf>,
    },
    /// Print the resolved configuration
    Config,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    let config = folio::load_config(cli.config.as_deref())?;
    let default_content = PathBuf::from(&config.content.dir);

    match cli.command {
        Commands::Check { content, strict } => {
            let content_dir = content.unwrap_or(default_content);
            folio::cmd::check::run(&config, &content_dir, strict)?;
        }
        Commands::New {
            collection,
            name,
            title,
            content,
        } => {
            let content_dir = content.unwrap_or(default_content);
            folio::cmd::new::run(&content_dir, &collection, &name, title.as_deref())?;
        }
        Commands::Config => {
            folio::cmd::config::run(&config)?;
        }
    }

    Ok(())
}
