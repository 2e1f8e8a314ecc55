use std::path::PathBuf;

use audiowaveform_client::options::rules::{
    clap_bits, clap_color_code, clap_compression, clap_finite, clap_input_filename,
    clap_input_format, clap_output_filename, clap_output_format, BAR_STYLES, COLOR_SCHEMES, RAW_SAMPLE_FORMATS,
    WAVEFORM_STYLES,
};
use audiowaveform_client::{InvalidOption, LocatorKind, Options};
use clap::builder::PossibleValuesParser;
use clap::{ArgMatches, Args, CommandFactory, FromArgMatches, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "awc")]
#[command(about = "Validate options and run audiowaveform", long_about = None)]
#[command(version)]
#[command(subcommand_help_heading = "Commands")]
pub struct Cli {
    /// Config file (default: <config dir>/audiowaveform-client/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Name of the audiowaveform executable
    #[arg(long, global = true)]
    pub binary: Option<String>,

    /// Directory containing the executable (skips lookup)
    #[arg(long, global = true)]
    pub bin_dir: Option<PathBuf>,

    /// How to look up the executable
    #[arg(long, global = true, value_enum)]
    pub locator: Option<LocatorKind>,

    /// Seconds before a run is killed
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse `args`, keeping the raw matches so option order can be recovered
    pub fn try_parse_with_matches<I, T>(args: I) -> Result<(Self, ArgMatches), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        let cli = Self::from_arg_matches(&matches)?;
        Ok((cli, matches))
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the version of the installed audiowaveform
    Version,

    /// Print the path of the audiowaveform executable
    Locate,

    /// Run audiowaveform with the given options
    Render {
        #[command(flatten)]
        options: OptionArgs,
    },

    /// Print the arguments a render would use, without running it
    Args {
        /// Print a JSON array instead of a shell command line
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        options: OptionArgs,
    },
}

/// audiowaveform options, passed on in the order they were given
#[derive(Args, Debug, Default)]
pub struct OptionArgs {
    /// Input file (.mp3, .wav, .flac, .ogg, .oga, .opus, .dat)
    #[arg(short, long, value_parser = clap_input_filename)]
    pub input_filename: Option<String>,

    /// Input format when it cannot be told from the file name
    #[arg(long, value_parser = clap_input_format)]
    pub input_format: Option<String>,

    /// Output file (.wav, .dat, .png, .json)
    #[arg(short, long, value_parser = clap_output_filename)]
    pub output_filename: Option<String>,

    #[arg(long, value_parser = clap_output_format)]
    pub output_format: Option<String>,

    /// Disable progress and information messages
    #[arg(short, long)]
    pub quiet: bool,

    /// Output one waveform per channel
    #[arg(long)]
    pub split_channels: bool,

    /// Zoom level (samples per pixel)
    #[arg(short, long)]
    pub zoom: Option<u32>,

    #[arg(long)]
    pub pixels_per_second: Option<u32>,

    /// Bits (8 or 16)
    #[arg(short, long, value_parser = clap_bits)]
    pub bits: Option<i32>,

    /// Start time (seconds)
    #[arg(short, long, value_parser = clap_finite)]
    pub start: Option<f64>,

    /// End time (seconds)
    #[arg(short, long, value_parser = clap_finite)]
    pub end: Option<f64>,

    /// Image width (pixels)
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Image height (pixels)
    #[arg(long)]
    pub height: Option<u32>,

    /// Color scheme
    #[arg(short, long, value_parser = PossibleValuesParser::new(COLOR_SCHEMES))]
    pub colors: Option<String>,

    /// Waveform color (rrggbb[aa])
    #[arg(long, value_parser = clap_color_code)]
    pub waveform_color: Option<String>,

    /// Border color (rrggbb[aa])
    #[arg(long, value_parser = clap_color_code)]
    pub border_color: Option<String>,

    /// Background color (rrggbb[aa])
    #[arg(long, value_parser = clap_color_code)]
    pub background_color: Option<String>,

    /// Axis label color (rrggbb[aa])
    #[arg(long, value_parser = clap_color_code)]
    pub axis_label_color: Option<String>,

    #[arg(long, conflicts_with = "with_axis_labels")]
    pub no_axis_labels: bool,

    #[arg(long)]
    pub with_axis_labels: bool,

    #[arg(long, value_parser = PossibleValuesParser::new(WAVEFORM_STYLES))]
    pub waveform_style: Option<String>,

    #[arg(long, value_parser = PossibleValuesParser::new(BAR_STYLES))]
    pub bar_style: Option<String>,

    #[arg(long)]
    pub bar_width: Option<u32>,

    #[arg(long)]
    pub bar_gap: Option<u32>,

    #[arg(long, value_parser = clap_finite)]
    pub amplitude_scale: Option<f64>,

    /// PNG compression level: 0 (none) to 9 (best), or -1 (default)
    #[arg(long, value_parser = clap_compression, allow_negative_numbers = true)]
    pub compression: Option<i32>,

    #[arg(long, value_parser = PossibleValuesParser::new(RAW_SAMPLE_FORMATS))]
    pub raw_samples_format: Option<String>,

    #[arg(long)]
    pub raw_samplerate: Option<u32>,

    #[arg(long)]
    pub raw_channels: Option<u32>,

    /// Pass --help to audiowaveform
    #[arg(long)]
    pub tool_help: bool,
}

/// One pending setter call, keyed by the clap id of the argument it came from
type Step<'a> = (&'static str, Box<dyn FnOnce(&mut Options) -> Result<(), InvalidOption> + 'a>);

impl OptionArgs {
    /// Build `Options` in command-line order
    ///
    /// `matches` are the subcommand's matches; arguments are sorted by the
    /// position clap recorded for them.
    pub fn to_options(&self, matches: &ArgMatches) -> Result<Options, InvalidOption> {
        let mut steps = self.steps();
        steps.sort_by_key(|(id, _)| matches.index_of(id).unwrap_or(usize::MAX));

        let mut options = Options::new();
        for (_, apply) in steps {
            apply(&mut options)?;
        }
        Ok(options)
    }

    fn steps(&self) -> Vec<Step<'_>> {
        let mut steps: Vec<Step<'_>> = Vec::new();

        macro_rules! step {
            ($id:literal, $apply:expr) => {
                steps.push(($id, Box::new($apply)))
            };
        }

        if let Some(name) = &self.input_filename {
            step!("input_filename", move |o: &mut Options| o.input_filename(name).map(|_| ()));
        }
        if let Some(format) = &self.input_format {
            step!("input_format", move |o: &mut Options| o.input_format(format).map(|_| ()));
        }
        if let Some(name) = &self.output_filename {
            step!("output_filename", move |o: &mut Options| o.output_filename(name).map(|_| ()));
        }
        if let Some(format) = &self.output_format {
            step!("output_format", move |o: &mut Options| o.output_format(format).map(|_| ()));
        }
        if self.quiet {
            step!("quiet", |o: &mut Options| {
                o.quiet();
                Ok(())
            });
        }
        if self.split_channels {
            step!("split_channels", |o: &mut Options| {
                o.split_channels();
                Ok(())
            });
        }
        if let Some(zoom) = self.zoom {
            step!("zoom", move |o: &mut Options| {
                o.zoom(zoom);
                Ok(())
            });
        }
        if let Some(pixels) = self.pixels_per_second {
            step!("pixels_per_second", move |o: &mut Options| {
                o.pixels_per_second(pixels);
                Ok(())
            });
        }
        if let Some(bits) = self.bits {
            step!("bits", move |o: &mut Options| o.bits(bits).map(|_| ()));
        }
        if let Some(start) = self.start {
            step!("start", move |o: &mut Options| o.start(start).map(|_| ()));
        }
        if let Some(end) = self.end {
            step!("end", move |o: &mut Options| o.end(end).map(|_| ()));
        }
        if let Some(width) = self.width {
            step!("width", move |o: &mut Options| {
                o.width(width);
                Ok(())
            });
        }
        if let Some(height) = self.height {
            step!("height", move |o: &mut Options| {
                o.height(height);
                Ok(())
            });
        }
        if let Some(scheme) = &self.colors {
            step!("colors", move |o: &mut Options| o.colors(scheme).map(|_| ()));
        }
        if let Some(color) = &self.waveform_color {
            step!("waveform_color", move |o: &mut Options| o.waveform_color(color).map(|_| ()));
        }
        if let Some(color) = &self.border_color {
            step!("border_color", move |o: &mut Options| o.border_color(color).map(|_| ()));
        }
        if let Some(color) = &self.background_color {
            step!("background_color", move |o: &mut Options| {
                o.background_color(color).map(|_| ())
            });
        }
        if let Some(color) = &self.axis_label_color {
            step!("axis_label_color", move |o: &mut Options| {
                o.axis_label_color(color).map(|_| ())
            });
        }
        if self.no_axis_labels {
            step!("no_axis_labels", |o: &mut Options| {
                o.no_axis_labels();
                Ok(())
            });
        }
        if self.with_axis_labels {
            step!("with_axis_labels", |o: &mut Options| {
                o.with_axis_labels();
                Ok(())
            });
        }
        if let Some(style) = &self.waveform_style {
            step!("waveform_style", move |o: &mut Options| o.waveform_style(style).map(|_| ()));
        }
        if let Some(style) = &self.bar_style {
            step!("bar_style", move |o: &mut Options| o.bar_style(style).map(|_| ()));
        }
        if let Some(pixels) = self.bar_width {
            step!("bar_width", move |o: &mut Options| {
                o.bar_width(pixels);
                Ok(())
            });
        }
        if let Some(pixels) = self.bar_gap {
            step!("bar_gap", move |o: &mut Options| {
                o.bar_gap(pixels);
                Ok(())
            });
        }
        if let Some(scale) = self.amplitude_scale {
            step!("amplitude_scale", move |o: &mut Options| {
                o.amplitude_scale(scale).map(|_| ())
            });
        }
        if let Some(level) = self.compression {
            step!("compression", move |o: &mut Options| o.compression(level).map(|_| ()));
        }
        if let Some(format) = &self.raw_samples_format {
            step!("raw_samples_format", move |o: &mut Options| {
                o.raw_samples_format(format).map(|_| ())
            });
        }
        if let Some(rate) = self.raw_samplerate {
            step!("raw_samplerate", move |o: &mut Options| {
                o.raw_samplerate(rate);
                Ok(())
            });
        }
        if let Some(channels) = self.raw_channels {
            step!("raw_channels", move |o: &mut Options| {
                o.raw_channels(channels);
                Ok(())
            });
        }
        if self.tool_help {
            step!("tool_help", |o: &mut Options| {
                o.help();
                Ok(())
            });
        }

        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("awc").chain(args.iter().copied()))
    }

    fn options_of(args: &[&str]) -> Vec<String> {
        let (cli, matches) =
            Cli::try_parse_with_matches(std::iter::once("awc").chain(args.iter().copied()))
                .unwrap();
        let (_, sub_matches) = matches.subcommand().unwrap();
        match cli.command {
            Commands::Render { options } | Commands::Args { options, .. } => {
                options.to_options(sub_matches).unwrap().args()
            }
            _ => panic!("expected an options command"),
        }
    }

    #[test]
    fn test_render_options_map_to_flags() {
        assert_eq!(
            options_of(&[
                "render", "-i", "talk.mp3", "-o", "talk.png", "-z", "256", "-b", "16", "-q",
            ]),
            [
                "--input-filename=talk.mp3",
                "--output-filename=talk.png",
                "--zoom=256",
                "--bits=16",
                "--quiet",
            ]
        );
    }

    #[test]
    fn test_options_follow_command_line_order() {
        assert_eq!(
            options_of(&["args", "-q", "--waveform-color", "ff0000", "-z", "256", "--split-channels"]),
            [
                "--quiet",
                "--waveform-color=ff0000",
                "--zoom=256",
                "--split-channels",
            ]
        );
        assert_eq!(
            options_of(&["args", "--split-channels", "-z", "256", "--waveform-color", "ff0000", "-q"]),
            [
                "--split-channels",
                "--zoom=256",
                "--waveform-color=ff0000",
                "--quiet",
            ]
        );
    }

    #[test]
    fn test_non_finite_numbers_rejected_at_parse_time() {
        assert!(parse(&["render", "-s", "nan"]).is_err());
        assert!(parse(&["render", "--end", "inf"]).is_err());
        assert!(parse(&["render", "--amplitude-scale", "NaN"]).is_err());
        assert_eq!(options_of(&["args", "-s", "1.5", "-e", "4"]), ["--start=1.5", "--end=4"]);
    }

    #[test]
    fn test_invalid_values_rejected_at_parse_time() {
        assert!(parse(&["render", "-i", "talk.aac"]).is_err());
        assert!(parse(&["render", "-b", "12"]).is_err());
        assert!(parse(&["render", "--waveform-color", "red"]).is_err());
        assert!(parse(&["render", "--compression", "10"]).is_err());
        assert!(parse(&["render", "--colors", "winamp"]).is_err());
        assert!(parse(&["render", "--raw-samples-format", "s12"]).is_err());
    }

    #[test]
    fn test_negative_compression_accepted() {
        assert_eq!(options_of(&["args", "--compression", "-1"]), ["--compression=-1"]);
    }

    #[test]
    fn test_axis_label_flags_conflict() {
        assert!(parse(&["render", "--no-axis-labels", "--with-axis-labels"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["version", "--bin-dir", "/opt/aw", "--timeout", "5", "-v"]).unwrap();
        assert_eq!(cli.bin_dir, Some(PathBuf::from("/opt/aw")));
        assert_eq!(cli.timeout, Some(5));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Version));
    }

    #[test]
    fn test_locator_value() {
        let cli = parse(&["locate", "--locator", "which"]).unwrap();
        assert_eq!(cli.locator, Some(LocatorKind::Which));
    }
}
