//! Implementations of the `awc` subcommands

pub mod args;
pub mod locate;
pub mod render;
pub mod version;
