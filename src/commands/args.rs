//! Show the argument list a render would use, without running anything

use std::path::Path;

use anyhow::Result;

use crate::config::ClientConfig;
use crate::invoker::command_line;
use crate::options::Options;

pub fn execute(config: &ClientConfig, options: &Options, json: bool) -> Result<()> {
    println!("{}", format_args_output(config, options, json)?);
    Ok(())
}

/// JSON array of argv tokens, or a shell-quoted command line
pub fn format_args_output(config: &ClientConfig, options: &Options, json: bool) -> Result<String> {
    let args = options.args();
    if json {
        return Ok(serde_json::to_string_pretty(&args)?);
    }

    let program = match &config.bin_dir {
        Some(dir) => dir.join(&config.binary_name),
        None => Path::new(&config.binary_name).to_path_buf(),
    };
    Ok(command_line(&program, &args))
}
