//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// sitemeta - SEO metadata toolkit for static marketing sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Config file name (default: sitemeta.toml)
    #[arg(short = 'C', long, default_value = "sitemeta.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Validate the SEO configuration and report errors/warnings
    Validate {
        /// List passing checks as well as failures
        #[arg(short, long)]
        verbose: bool,

        /// Exit non-zero when any warning is present
        #[arg(long)]
        fail_on_warnings: bool,

        /// Emit the validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Generate sitemap.xml, robots.txt and manifest.json into the site root
    Generate,

    /// Serve the site with the SEO endpoints and contact API
    Serve {
        /// Interface to bind on
        #[arg(short, long)]
        interface: Option<String>,

        /// The port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_validate(&self) -> bool {
        matches!(self.command, Commands::Validate { .. })
    }
    pub const fn is_generate(&self) -> bool {
        matches!(self.command, Commands::Generate)
    }
    pub const fn is_serve(&self) -> bool {
        matches!(self.command, Commands::Serve { .. })
    }
}
