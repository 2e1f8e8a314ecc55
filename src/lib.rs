//! Validated command-line builder and runner for `audiowaveform`
//!
//! ```no_run
//! use audiowaveform_client::{Audiowaveform, Options};
//!
//! let invoker = Audiowaveform::new()?;
//!
//! let mut options = Options::new();
//! options
//!     .input_filename("episode.mp3")?
//!     .output_filename("episode.png")?
//!     .zoom(256)
//!     .waveform_color("3366ffcc")?
//!     .quiet();
//!
//! invoker.execute(options)?;
//! # Ok::<(), audiowaveform_client::Error>(())
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod invoker;
pub mod locator;
pub mod options;
pub mod process;

pub use config::ClientConfig;
pub use error::{DiscoveryError, Error, InvalidOption, Result};
pub use invoker::{Audiowaveform, Output, BINARY_NAME, DEFAULT_TIMEOUT};
pub use locator::{BinaryLocator, FixedLocator, LocatorKind, WhereisLocator, WhichLocator};
pub use options::{CliOption, Options};
