//! Command-line options for audiowaveform
//!
//! `Options` accumulates validated flags in the order they were set. Every
//! validating setter checks its value first and returns `InvalidOption` without
//! touching the list, so a rejected call leaves the builder as it was.
//!
//! ```
//! use audiowaveform_client::Options;
//!
//! let mut options = Options::new();
//! options.zoom(256).bits(16)?.quiet();
//! assert_eq!(options.args(), ["--zoom=256", "--bits=16", "--quiet"]);
//! # Ok::<(), audiowaveform_client::InvalidOption>(())
//! ```

pub mod rules;


use serde::Serialize;

use crate::error::InvalidOption;
use rules::{
    check_bits, check_color_code, check_compression, check_extension, check_finite,
    check_format, check_one_of, BAR_STYLES, COLOR_SCHEMES, INPUT_TYPES, OUTPUT_TYPES, RAW_SAMPLE_FORMATS,
    WAVEFORM_STYLES,
};

/// A single command-line option
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CliOption {
    /// Bare switch, rendered as `--name`
    Flag { name: &'static str },
    /// Rendered as `--name=value`
    KeyValue { name: &'static str, value: String },
}

impl CliOption {
    pub fn name(&self) -> &'static str {
        match self {
            CliOption::Flag { name } | CliOption::KeyValue { name, .. } => name,
        }
    }

    /// The argv token for this option
    pub fn token(&self) -> String {
        match self {
            CliOption::Flag { name } => format!("--{name}"),
            CliOption::KeyValue { name, value } => format!("--{name}={value}"),
        }
    }
}

/// Ordered, validated option list for one audiowaveform invocation
///
/// Options are not deduplicated: setting the same flag twice passes it twice and
/// the tool honours the last one.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Options {
    options: Vec<CliOption>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CliOption> {
        self.options.iter()
    }

    /// Argument tokens in the order the setters were called
    pub fn args(&self) -> Vec<String> {
        self.options.iter().map(CliOption::token).collect()
    }

    fn flag(&mut self, name: &'static str) -> &mut Self {
        self.options.push(CliOption::Flag { name });
        self
    }

    fn key_value(&mut self, name: &'static str, value: impl ToString) -> &mut Self {
        self.options.push(CliOption::KeyValue {
            name,
            value: value.to_string(),
        });
        self
    }

    /// Show the tool's help message
    pub fn help(&mut self) -> &mut Self {
        self.flag("help")
    }

    /// Show the tool's version information
    pub fn version(&mut self) -> &mut Self {
        self.flag("version")
    }

    /// Disable progress and information messages
    pub fn quiet(&mut self) -> &mut Self {
        self.flag("quiet")
    }

    /// Input file: MP3, WAV, FLAC, Ogg Vorbis, Opus, or binary waveform data
    pub fn input_filename(&mut self, name: &str) -> Result<&mut Self, InvalidOption> {
        check_extension("input-filename", name, INPUT_TYPES)?;
        Ok(self.key_value("input-filename", name))
    }

    /// Input format, needed when the input file name does not reveal it
    pub fn input_format(&mut self, format: &str) -> Result<&mut Self, InvalidOption> {
        let format = check_format("input-format", format, INPUT_TYPES)?;
        Ok(self.key_value("input-format", format))
    }

    pub fn output_filename(&mut self, name: &str) -> Result<&mut Self, InvalidOption> {
        check_extension("output-filename", name, OUTPUT_TYPES)?;
        Ok(self.key_value("output-filename", name))
    }

    pub fn output_format(&mut self, format: &str) -> Result<&mut Self, InvalidOption> {
        let format = check_format("output-format", format, OUTPUT_TYPES)?;
        Ok(self.key_value("output-format", format))
    }

    /// Output one waveform per channel instead of a combined one
    pub fn split_channels(&mut self) -> &mut Self {
        self.flag("split-channels")
    }

    /// Samples per pixel
    pub fn zoom(&mut self, level: u32) -> &mut Self {
        self.key_value("zoom", level)
    }

    pub fn pixels_per_second(&mut self, pixels: u32) -> &mut Self {
        self.key_value("pixels-per-second", pixels)
    }

    /// Resolution of waveform data, 8 or 16 bits
    pub fn bits(&mut self, bits: i32) -> Result<&mut Self, InvalidOption> {
        check_bits(bits)?;
        Ok(self.key_value("bits", bits))
    }

    /// Start time in seconds
    pub fn start(&mut self, seconds: f64) -> Result<&mut Self, InvalidOption> {
        check_finite("start", seconds)?;
        Ok(self.key_value("start", seconds))
    }

    /// End time in seconds
    pub fn end(&mut self, seconds: f64) -> Result<&mut Self, InvalidOption> {
        check_finite("end", seconds)?;
        Ok(self.key_value("end", seconds))
    }

    /// Image width in pixels
    pub fn width(&mut self, pixels: u32) -> &mut Self {
        self.key_value("width", pixels)
    }

    /// Image height in pixels
    pub fn height(&mut self, pixels: u32) -> &mut Self {
        self.key_value("height", pixels)
    }

    /// Image color scheme: `audacity` (blue on grey) or `audition` (green on dark)
    pub fn colors(&mut self, scheme: &str) -> Result<&mut Self, InvalidOption> {
        check_one_of("colors", scheme, COLOR_SCHEMES)?;
        Ok(self.key_value("colors", scheme))
    }

    /// Waveform color as rrggbb[aa]; overrides the color scheme
    pub fn waveform_color(&mut self, color: &str) -> Result<&mut Self, InvalidOption> {
        check_color_code("waveform-color", color)?;
        Ok(self.key_value("waveform-color", color))
    }

    pub fn border_color(&mut self, color: &str) -> Result<&mut Self, InvalidOption> {
        check_color_code("border-color", color)?;
        Ok(self.key_value("border-color", color))
    }

    pub fn background_color(&mut self, color: &str) -> Result<&mut Self, InvalidOption> {
        check_color_code("background-color", color)?;
        Ok(self.key_value("background-color", color))
    }

    pub fn axis_label_color(&mut self, color: &str) -> Result<&mut Self, InvalidOption> {
        check_color_code("axis-label-color", color)?;
        Ok(self.key_value("axis-label-color", color))
    }

    pub fn no_axis_labels(&mut self) -> &mut Self {
        self.flag("no-axis-labels")
    }

    pub fn with_axis_labels(&mut self) -> &mut Self {
        self.flag("with-axis-labels")
    }

    pub fn waveform_style(&mut self, style: &str) -> Result<&mut Self, InvalidOption> {
        check_one_of("waveform-style", style, WAVEFORM_STYLES)?;
        Ok(self.key_value("waveform-style", style))
    }

    pub fn bar_style(&mut self, style: &str) -> Result<&mut Self, InvalidOption> {
        check_one_of("bar-style", style, BAR_STYLES)?;
        Ok(self.key_value("bar-style", style))
    }

    pub fn bar_width(&mut self, pixels: u32) -> &mut Self {
        self.key_value("bar-width", pixels)
    }

    pub fn bar_gap(&mut self, pixels: u32) -> &mut Self {
        self.key_value("bar-gap", pixels)
    }

    pub fn amplitude_scale(&mut self, scale: f64) -> Result<&mut Self, InvalidOption> {
        check_finite("amplitude-scale", scale)?;
        Ok(self.key_value("amplitude-scale", scale))
    }

    /// PNG compression level, -1 to 9
    pub fn compression(&mut self, level: i32) -> Result<&mut Self, InvalidOption> {
        check_compression(level)?;
        Ok(self.key_value("compression", level))
    }

    /// Sample encoding of raw input
    pub fn raw_samples_format(&mut self, format: &str) -> Result<&mut Self, InvalidOption> {
        check_one_of("raw-samples-format", format, RAW_SAMPLE_FORMATS)?;
        Ok(self.key_value("raw-samples-format", format))
    }

    pub fn raw_samplerate(&mut self, rate: u32) -> &mut Self {
        self.key_value("raw-samplerate", rate)
    }

    pub fn raw_channels(&mut self, channels: u32) -> &mut Self {
        self.key_value("raw-channels", channels)
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = &'a CliOption;
    type IntoIter = std::slice::Iter<'a, CliOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.options.iter()
    }
}
