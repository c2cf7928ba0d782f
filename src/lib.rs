//! zxpack — an optimal-parsing cruncher for tiny LZ stream formats aimed
//! at 8-bit targets, notably the ZX Spectrum.
//!
//! For each supported format the parser selects the token sequence with the
//! minimum encoded bit length under that format's exact cost model, so the
//! output is as short as the format allows while the matching decoder stays
//! small enough to fit in ~100 bytes of machine code.
//!
//! The usual entry points are [`compress`] / [`decompress`] for in-memory
//! buffers and [`io::compress_file`] for the file-to-file path the binary
//! uses.

pub mod bitstream;
pub mod cli;
pub mod codes;
pub mod compress;
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod format;
pub mod io;
pub mod matcher;
pub mod parse;

/// Bit-serial buffer underlying every wire format.
pub use bitstream::BitStream;
/// One-shot buffer compression.
pub use compress::compress;
/// Inverse of [`compress`]; also the post-compression verifier.
pub use compress::decompress;
/// Largest supported input size in bytes.
pub use compress::MAX_INPUT_SIZE;
/// Crate-wide error taxonomy.
pub use error::{DecodeError, Error, Warning};
/// Format descriptor with limits and cost model.
pub use format::{Format, FormatId, FormatOptions};
/// A single literal-run or back-reference token.
pub use parse::ParseStep;
