use anyhow::Result;
use audiowaveform_client::commands::{args, locate, render, version};
use audiowaveform_client::ClientConfig;
use clap::ArgMatches;

use super::types::{Cli, Commands};

/// Run the parsed command; `matches` are the top-level matches `cli` came from
pub fn dispatch(cli: Cli, matches: &ArgMatches) -> Result<()> {
    let config = resolve_config(&cli)?;
    tracing::debug!("Using config: {:?}", config);

    let sub_matches = match matches.subcommand() {
        Some((_, sub_matches)) => sub_matches,
        None => matches,
    };

    match cli.command {
        Commands::Version => version::execute(&config),
        Commands::Locate => locate::execute(&config),
        Commands::Render { options } => {
            render::execute(&config, options.to_options(sub_matches)?)
        }
        Commands::Args { json, options } => {
            args::execute(&config, &options.to_options(sub_matches)?, json)
        }
    }
}

/// Config file values, overridden by any global flags given
fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::load(cli.config.as_deref())?;

    if let Some(binary) = &cli.binary {
        config.binary_name = binary.clone();
    }
    if let Some(dir) = &cli.bin_dir {
        config.bin_dir = Some(dir.clone());
    }
    if let Some(locator) = cli.locator {
        config.locator = locator;
    }
    if let Some(timeout) = cli.timeout {
        config.timeout_secs = timeout;
    }

    Ok(config)
}
