//! Compression and decompression drivers.
//!
//! `compress` ties the pipeline together: validate, reverse when asked,
//! parse, encode, collect warnings, reverse the stream back, and — in debug
//! builds — prove the round trip through the reference decoder before
//! handing the bytes out.

use crate::bitstream::BitStream;
use crate::decoder;
use crate::encoder;
use crate::error::{Error, Warning};
use crate::format::{Format, FormatId};
use crate::parse;

/// Largest supported input: positions and the terminal parser node must fit
/// a 16-bit index.
pub const MAX_INPUT_SIZE: usize = 65_534;

/// A finished compression: the wire bytes plus any user-visible warnings.
#[derive(Debug)]
pub struct CompressOutput {
    pub bytes: Vec<u8>,
    pub warnings: Vec<Warning>,
}

/// Compresses `input` into the wire format described by `format`.
pub fn compress(input: &[u8], format: &Format) -> Result<CompressOutput, Error> {
    if input.is_empty() {
        return Err(Error::Input("input is empty".into()));
    }
    if input.len() > MAX_INPUT_SIZE {
        return Err(Error::Input(format!(
            "input is {} bytes; the maximum is {MAX_INPUT_SIZE}",
            input.len()
        )));
    }

    // Reverse mode works on a reversed copy and un-reverses the stream at
    // the end, so the decoder can run tail-to-head in place.
    let reversed;
    let data: &[u8] = if format.options().reverse {
        reversed = input.iter().rev().copied().collect::<Vec<u8>>();
        &reversed
    } else {
        input
    };

    let steps = parse::parse(data, format);
    let mut stream = encoder::encode(data, &steps, format);

    let mut warnings = Vec::new();
    if stream.carry_warning() {
        warnings.push(Warning::CarryFallback);
    }

    if format.options().reverse {
        stream.reverse();
    }

    let bytes = stream.into_bytes();

    #[cfg(debug_assertions)]
    verify_roundtrip(input, &bytes, format)?;

    if bytes.len() >= input.len() {
        warnings.push(Warning::NoSizeGain {
            input_size: input.len(),
            output_size: bytes.len(),
        });
    }

    Ok(CompressOutput { bytes, warnings })
}

/// Decompresses `packed` back into the original bytes. `unpacked_size == 0`
/// relies on the end-of-stream sentinel and is only valid for streams
/// written with one.
pub fn decompress(packed: &[u8], format: &Format, unpacked_size: usize) -> Result<Vec<u8>, Error> {
    let mut bytes = packed.to_vec();
    if format.options().reverse {
        bytes.reverse();
    }

    let mut stream = if format.id() == FormatId::E1zx {
        BitStream::from_bytes_negated(bytes)
    } else {
        BitStream::from_bytes(bytes)
    };

    let mut output = decoder::decode(&mut stream, format, unpacked_size)?;

    if format.options().reverse {
        output.reverse();
    }

    Ok(output)
}

#[cfg(debug_assertions)]
fn verify_roundtrip(input: &[u8], packed: &[u8], format: &Format) -> Result<(), Error> {
    let unpacked = decompress(packed, format, input.len())?;
    if unpacked != input {
        return Err(Error::Compression(
            "verification failed: decoded stream differs from the input".into(),
        ));
    }
    Ok(())
}
