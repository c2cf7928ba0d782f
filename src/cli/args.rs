//! Argument parsing for the `zxpack` binary.
//!
//! The grammar is deliberately tiny: at most one format option, any number
//! of flag options, one input file and an optional output file. Options use
//! multi-character short names (`-e1zx`), so the loop matches them whole
//! instead of aggregating single letters.
//!
//! [`parse_args_from`] takes an explicit slice and is callable from tests
//! without touching `std::env`.

use std::path::PathBuf;

use crate::error::Error;
use crate::format::{FormatId, FormatOptions};

/// Everything the argument loop discovers.
#[derive(Debug)]
pub struct ParsedArgs {
    pub options: FormatOptions,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
}

/// Parses `argv` (without the program name). The caller handles the
/// zero-argument case by printing usage first.
pub fn parse_args_from(argv: &[String]) -> Result<ParsedArgs, Error> {
    let mut options = FormatOptions::new(FormatId::Lzm);
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;

    for arg in argv {
        match arg.as_str() {
            "-lzm" => options.id = FormatId::Lzm,
            "-ef8" | "-e1" => options.id = FormatId::Ef8,
            "-e1zx" => options.id = FormatId::E1zx,
            "-bx0" => options.id = FormatId::Bx0,
            "-bx2" => options.id = FormatId::Bx2,
            "-r" => options.reverse = true,
            "-e" => options.end_marker = true,
            "-o" => options.extend_offset = true,
            "-l" => options.extend_length = true,
            other if other.starts_with('-') => {
                return Err(Error::InvalidArgument(format!("unknown option {other}")));
            }
            path => {
                if input.is_none() {
                    input = Some(PathBuf::from(path));
                } else if output.is_none() {
                    output = Some(PathBuf::from(path));
                } else {
                    return Err(Error::InvalidArgument(format!(
                        "unexpected extra argument {path}"
                    )));
                }
            }
        }
    }

    let input = input.ok_or_else(|| Error::InvalidArgument("no input file given".into()))?;

    Ok(ParsedArgs { options, input, output })
}
