//! Run audiowaveform with validated options
//!
//! Whatever the tool writes to stdout (image or data when the output file is
//! `-`, or its help and version text) is passed through unchanged.

use std::io::Write;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::config::ClientConfig;
use crate::options::Options;

pub fn execute(config: &ClientConfig, options: Options) -> Result<()> {
    let invoker = config.invoker()?;
    let output = invoker.run(options).context("audiowaveform run failed")?;

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&output.stdout)
        .context("Failed to write audiowaveform output")?;
    stdout.flush()?;

    eprintln!(
        "{} in {:.2}s",
        "Done".green().bold(),
        output.duration.as_secs_f64()
    );
    Ok(())
}
