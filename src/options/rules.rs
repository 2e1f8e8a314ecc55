//! Validation rules for audiowaveform option values
//!
//! Every check returns `InvalidOption` naming the flag it guards, so errors can be
//! surfaced to the caller unchanged. The `clap_*` wrappers adapt the same checks
//! for use as clap value parsers in the `awc` binary.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::InvalidOption;

/// File types audiowaveform can read
pub const INPUT_TYPES: &[&str] = &["mp3", "wav", "flac", "ogg", "opus", "oga", "dat"];

/// File types audiowaveform can write
pub const OUTPUT_TYPES: &[&str] = &["wav", "dat", "png", "json"];

/// Built-in image color schemes
pub const COLOR_SCHEMES: &[&str] = &["audacity", "audition"];

pub const WAVEFORM_STYLES: &[&str] = &["normal", "bars"];

pub const BAR_STYLES: &[&str] = &["square", "rounded"];

/// Sample encodings accepted for raw (headerless) input
pub const RAW_SAMPLE_FORMATS: &[&str] = &[
    "s8", "u8", "s16le", "s16be", "s24le", "s24be", "s32le", "s32be", "f32le", "f32be", "f64le",
    "f64be",
];

pub const ALLOWED_BITS: &[i32] = &[8, 16];

pub const MIN_COMPRESSION: i32 = -1;
pub const MAX_COMPRESSION: i32 = 9;

/// rrggbb or rrggbbaa
static COLOR_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Fa-f]{6}([0-9A-Fa-f]{2})?$").expect("color code pattern is valid")
});

/// Lowercase extension of a file name, if it has one
///
/// A name that is only a dot and an extension, like `.wav`, counts as having
/// that extension.
pub fn file_extension(name: &str) -> Option<String> {
    let path = Path::new(name);
    let ext = match path.extension() {
        Some(ext) => ext.to_str()?,
        None => path.file_name()?.to_str()?.strip_prefix('.')?,
    };

    if ext.is_empty() {
        None
    } else {
        Some(ext.to_ascii_lowercase())
    }
}

/// Check that a file name carries one of the allowed extensions
pub fn check_extension(
    option: &'static str,
    name: &str,
    allowed: &[&str],
) -> Result<(), InvalidOption> {
    match file_extension(name) {
        Some(ext) if allowed.contains(&ext.as_str()) => Ok(()),
        _ => Err(InvalidOption::new(
            option,
            name,
            format!("file does not have one of the allowed types ({})", allowed.join(", ")),
        )),
    }
}

/// Normalize a format given as `mp3`, `.mp3` or `song.mp3`, checking it against the set
pub fn check_format(
    option: &'static str,
    value: &str,
    allowed: &[&str],
) -> Result<String, InvalidOption> {
    let format = value
        .rsplit('.')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();

    if allowed.contains(&format.as_str()) {
        Ok(format)
    } else {
        Err(InvalidOption::new(
            option,
            value,
            format!("format is not one of the allowed types ({})", allowed.join(", ")),
        ))
    }
}

/// Check membership in a fixed set of names (case-sensitive, as the tool is)
pub fn check_one_of(
    option: &'static str,
    value: &str,
    allowed: &[&str],
) -> Result<(), InvalidOption> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(InvalidOption::new(
            option,
            value,
            format!("allowed values are {}", allowed.join(", ")),
        ))
    }
}

/// Check an rrggbb / rrggbbaa color code
///
/// Both the length and the hex digits are checked.
pub fn check_color_code(option: &'static str, color: &str) -> Result<(), InvalidOption> {
    if color.len() != 6 && color.len() != 8 {
        return Err(InvalidOption::new(
            option,
            color,
            "colors have to be rrggbb or rrggbbaa",
        ));
    }

    if !COLOR_CODE.is_match(color) {
        return Err(InvalidOption::new(
            option,
            color,
            "color codes may only contain hexadecimal digits",
        ));
    }

    Ok(())
}

pub fn check_bits(bits: i32) -> Result<(), InvalidOption> {
    if ALLOWED_BITS.contains(&bits) {
        Ok(())
    } else {
        Err(InvalidOption::new("bits", bits, "must be 8 or 16"))
    }
}

/// PNG compression: 0 (none) to 9 (best), or -1 for the library default
pub fn check_compression(level: i32) -> Result<(), InvalidOption> {
    if (MIN_COMPRESSION..=MAX_COMPRESSION).contains(&level) {
        Ok(())
    } else {
        Err(InvalidOption::new(
            "compression",
            level,
            format!("must be between {MIN_COMPRESSION} and {MAX_COMPRESSION}"),
        ))
    }
}

/// Reject NaN and infinities, which the tool cannot parse
pub fn check_finite(option: &'static str, value: f64) -> Result<(), InvalidOption> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InvalidOption::new(option, value, "must be a finite number"))
    }
}

pub fn clap_input_filename(s: &str) -> Result<String, String> {
    check_extension("input-filename", s, INPUT_TYPES).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

pub fn clap_output_filename(s: &str) -> Result<String, String> {
    check_extension("output-filename", s, OUTPUT_TYPES).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

pub fn clap_input_format(s: &str) -> Result<String, String> {
    check_format("input-format", s, INPUT_TYPES).map_err(|e| e.to_string())
}

pub fn clap_output_format(s: &str) -> Result<String, String> {
    check_format("output-format", s, OUTPUT_TYPES).map_err(|e| e.to_string())
}

pub fn clap_color_code(s: &str) -> Result<String, String> {
    check_color_code("color", s).map_err(|e| e.to_string())?;
    Ok(s.to_string())
}

pub fn clap_bits(s: &str) -> Result<i32, String> {
    let bits: i32 = s.parse().map_err(|_| format!("`{s}` is not an integer"))?;
    check_bits(bits).map_err(|e| e.to_string())?;
    Ok(bits)
}

pub fn clap_compression(s: &str) -> Result<i32, String> {
    let level: i32 = s.parse().map_err(|_| format!("`{s}` is not an integer"))?;
    check_compression(level).map_err(|e| e.to_string())?;
    Ok(level)
}

pub fn clap_finite(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("`{s}` is not a number"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err("must be a finite number".to_string())
    }
}
