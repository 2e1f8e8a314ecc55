//! Print the version of the installed audiowaveform

use anyhow::{Context, Result};

use crate::config::ClientConfig;

pub fn execute(config: &ClientConfig) -> Result<()> {
    let invoker = config.invoker()?;
    let version = invoker
        .version()
        .context("Failed to query audiowaveform version")?;
    println!("{version}");
    Ok(())
}
