use std::process::ExitCode;

use audiowaveform_client::{Error, InvalidOption};
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::{dispatch, Cli};

/// Exit status for values rejected before anything ran
const EXIT_INVALID_OPTION: u8 = 2;

fn main() -> ExitCode {
    let (cli, matches) =
        Cli::try_parse_with_matches(std::env::args_os()).unwrap_or_else(|e| e.exit());
    init_tracing(cli.verbose);

    match dispatch(cli, &matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", "error:".red().bold());
            exit_code_for(&e)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "audiowaveform_client=debug,awc=debug"
    } else {
        "audiowaveform_client=warn,awc=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    let invalid = error.downcast_ref::<InvalidOption>().is_some()
        || error
            .downcast_ref::<Error>()
            .is_some_and(Error::is_caller_error);

    if invalid {
        ExitCode::from(EXIT_INVALID_OPTION)
    } else {
        ExitCode::FAILURE
    }
}
