//! Print where audiowaveform was found

use anyhow::Result;

use crate::config::ClientConfig;

pub fn execute(config: &ClientConfig) -> Result<()> {
    let invoker = config.invoker()?;
    println!("{}", invoker.executable().display());
    Ok(())
}
