//! sitemeta - SEO metadata toolkit for static marketing sites.

mod cli;
mod config;
mod contact;
mod discover;
mod generator;
mod logger;
mod meta;
mod schema;
mod serve;
mod validate;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use generator::generate_outputs;
use serve::serve_site;
use std::path::Path;
use std::process::ExitCode;
use validate::report::run_validation;

fn main() -> Result<ExitCode> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Validate {
            verbose,
            fail_on_warnings,
            json,
        } => run_validation(config, *verbose, *fail_on_warnings, *json),
        Commands::Generate => generate_outputs(config).map(|()| ExitCode::SUCCESS),
        Commands::Serve { .. } => serve_site(config).map(|()| ExitCode::SUCCESS),
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    if !config_path.exists() {
        bail!("Config file not found: {}", config_path.display());
    }

    let mut config = SiteConfig::from_path(&config_path)?;
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}
