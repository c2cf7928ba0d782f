//! Error taxonomy and user-visible warnings.
//!
//! Every subsystem reports failures as values; only the binary formats them
//! for the user. Warnings are likewise returned as data and printed (to
//! stdout) by the binary alone, so library callers can decide what to do
//! with them.

use std::fmt;

// ── Crate-level errors ────────────────────────────────────────────────────────

/// Top-level error kinds surfaced by the compression drivers and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unknown flag or surplus positional argument.
    InvalidArgument(String),
    /// Input file cannot be opened or read, is empty, or is too large.
    Input(String),
    /// Output file cannot be created or written.
    Output(String),
    /// Internal invariant violation: verification mismatch or an impossible
    /// parse. Should not occur for valid inputs.
    Compression(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "bad usage: {msg}"),
            Error::Input(msg) => write!(f, "input error: {msg}"),
            Error::Output(msg) => write!(f, "output error: {msg}"),
            Error::Compression(msg) => write!(f, "compression failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ── Decoder errors ────────────────────────────────────────────────────────────

/// Errors raised by the reference decoders on malformed streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream ended in the middle of a token.
    UnexpectedEof,
    /// A back-reference pointed before the start of the produced output.
    InvalidOffset,
    /// A variable-length code did not terminate within its legal range.
    MalformedCode,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::UnexpectedEof => f.write_str("unexpected end of stream"),
            DecodeError::InvalidOffset => f.write_str("back-reference offset out of range"),
            DecodeError::MalformedCode => f.write_str("malformed length or offset code"),
        }
    }
}

impl std::error::Error for DecodeError {}

impl From<DecodeError> for Error {
    fn from(e: DecodeError) -> Self {
        Error::Compression(e.to_string())
    }
}

// ── Warnings ──────────────────────────────────────────────────────────────────

/// Non-fatal conditions reported to the user. None of these change the
/// process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A command-line option has no effect for the chosen format.
    OptionIgnored { option: &'static str, format: &'static str },
    /// The compressed stream is not smaller than the input.
    NoSizeGain { input_size: usize, output_size: usize },
    /// The negated stream produced a zero byte; the target decoder must set
    /// carry during its fetch to compensate.
    CarryFallback,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::OptionIgnored { option, format } => {
                write!(f, "option {option} has no effect for format {format}")
            }
            Warning::NoSizeGain { input_size, output_size } => write!(
                f,
                "no size gain ({input_size} bytes in, {output_size} bytes out)"
            ),
            Warning::CarryFallback => {
                f.write_str("final negated byte is zero; decoder must apply the carry-fetch fix")
            }
        }
    }
}
