//! Reference decoders for every wire format.
//!
//! These are the authoritative readers of the token layouts the encoders
//! emit; the compression driver runs them after every debug-build compress
//! to prove the round trip. They stop either when the known output size is
//! reached or, when `unpacked_size` is zero, at the format's end-of-stream
//! sentinel. Malformed streams produce errors instead of out-of-range
//! reads.

use crate::bitstream::BitStream;
use crate::codes::{decode_elias1, decode_raw};
use crate::error::DecodeError;
use crate::format::{Format, FormatId};

/// Decodes `stream` according to `format`. `unpacked_size == 0` means
/// "terminate on the end marker"; only use it on streams written with one.
/// Reverse handling happens in the compression driver, not here.
pub fn decode(
    stream: &mut BitStream,
    format: &Format,
    unpacked_size: usize,
) -> Result<Vec<u8>, DecodeError> {
    stream.read_reset();
    match format.id() {
        FormatId::Lzm => decode_lzm(stream, format, unpacked_size),
        FormatId::Ef8 | FormatId::E1zx => decode_ef8(stream, format, unpacked_size),
        FormatId::Bx0 => decode_bx0(stream, format, unpacked_size),
        FormatId::Bx2 => decode_bx2(stream, unpacked_size),
    }
}

fn read_bit(stream: &mut BitStream) -> Result<u32, DecodeError> {
    stream.read_bit().ok_or(DecodeError::UnexpectedEof)
}

fn read_byte(stream: &mut BitStream) -> Result<u8, DecodeError> {
    stream.read_byte().ok_or(DecodeError::UnexpectedEof)
}

fn read_elias1(stream: &mut BitStream) -> Result<u32, DecodeError> {
    decode_elias1(stream).ok_or(DecodeError::MalformedCode)
}

/// Copies `length` bytes from `offset` back in the produced output.
fn copy_match(output: &mut Vec<u8>, offset: usize, length: usize) -> Result<(), DecodeError> {
    if offset == 0 || offset > output.len() {
        return Err(DecodeError::InvalidOffset);
    }
    for _ in 0..length {
        output.push(output[output.len() - offset]);
    }
    Ok(())
}

// ── LZM ───────────────────────────────────────────────────────────────────────

fn decode_lzm(
    stream: &mut BitStream,
    format: &Format,
    unpacked_size: usize,
) -> Result<Vec<u8>, DecodeError> {
    let check_end_marker = unpacked_size == 0;
    let extend_offset = usize::from(format.options().extend_offset);
    let extend_length = usize::from(format.options().extend_length);

    let mut output = Vec::new();

    loop {
        let control = read_byte(stream)?;

        if check_end_marker && control == 0 {
            break;
        }

        let is_literal = control & 1 != 0;
        let length = usize::from(control >> 1) + extend_length;

        if is_literal {
            for _ in 0..length {
                output.push(read_byte(stream)?);
            }
        } else {
            let offset = usize::from(read_byte(stream)?) + extend_offset;
            copy_match(&mut output, offset, length)?;
        }

        if !check_end_marker && output.len() >= unpacked_size {
            break;
        }
    }

    Ok(output)
}

// ── EF8 / E1ZX ────────────────────────────────────────────────────────────────

fn decode_ef8(
    stream: &mut BitStream,
    format: &Format,
    unpacked_size: usize,
) -> Result<Vec<u8>, DecodeError> {
    let check_end_marker = unpacked_size == 0;
    let extend_offset = usize::from(format.options().extend_offset);

    let mut output = Vec::new();

    loop {
        let length = read_elias1(stream)? as usize;

        // The end marker reads back as a γ₁ value beyond the legal range.
        if check_end_marker && length > 255 {
            break;
        }

        if read_bit(stream)? != 0 {
            for _ in 0..length {
                output.push(read_byte(stream)?);
            }
        } else {
            let offset = usize::from(read_byte(stream)?) + extend_offset;
            copy_match(&mut output, offset, length + 1)?;
        }

        if !check_end_marker && output.len() >= unpacked_size {
            break;
        }
    }

    Ok(output)
}

// ── BX0 ───────────────────────────────────────────────────────────────────────

fn decode_bx0(
    stream: &mut BitStream,
    format: &Format,
    unpacked_size: usize,
) -> Result<Vec<u8>, DecodeError> {
    let check_end_marker = unpacked_size == 0;
    let extend_offset = usize::from(format.options().extend_offset);

    let mut output = Vec::new();
    let mut prev_literal = false;
    let mut last_offset = 0usize;

    loop {
        let flag = read_bit(stream)?;

        if flag != 0 {
            let length = read_elias1(stream)? as usize;

            if prev_literal {
                // Repeat match at the remembered offset.
                copy_match(&mut output, last_offset, length)?;
                prev_literal = false;
            } else {
                for _ in 0..length {
                    output.push(read_byte(stream)?);
                }
                prev_literal = true;
            }
        } else {
            let elias_part = read_elias1(stream)?;

            if check_end_marker && elias_part > 128 {
                break;
            }

            let raw_part = decode_raw(stream, 7).ok_or(DecodeError::UnexpectedEof)?;
            let wire = ((elias_part - 1) << 7) | raw_part;
            let offset = wire as usize + extend_offset;
            let length = read_elias1(stream)? as usize + 1;

            copy_match(&mut output, offset, length)?;
            last_offset = offset;
            prev_literal = false;
        }

        if !check_end_marker && output.len() >= unpacked_size {
            break;
        }
    }

    Ok(output)
}

// ── BX2 ───────────────────────────────────────────────────────────────────────

fn decode_bx2(stream: &mut BitStream, unpacked_size: usize) -> Result<Vec<u8>, DecodeError> {
    let check_end_marker = unpacked_size == 0;

    let mut output = Vec::new();
    let mut prev_literal = false;
    let mut last_offset = 0usize;

    loop {
        let value = read_elias1(stream)? as usize;
        let flag = read_bit(stream)?;

        if flag != 0 {
            if prev_literal {
                // Repeat match of `value` bytes at the remembered offset.
                copy_match(&mut output, last_offset, value)?;
                prev_literal = false;
            } else {
                for _ in 0..value {
                    output.push(read_byte(stream)?);
                }
                prev_literal = true;
            }
        } else {
            let offset = usize::from(read_byte(stream)?);

            if check_end_marker && offset == 0 {
                break;
            }

            copy_match(&mut output, offset, value + 1)?;
            last_offset = offset;
            prev_literal = false;
        }

        if !check_end_marker && output.len() >= unpacked_size {
            break;
        }
    }

    Ok(output)
}
