//! Token emission: turns a parse into the wire stream of each format.
//!
//! The byte layouts here are load-bearing: every cost function in
//! [`crate::format`] must account for exactly the bits written below, and
//! the decoders in [`crate::decoder`] read them back field by field. The
//! golden-byte tests at the bottom pin each layout.

use crate::bitstream::BitStream;
use crate::codes::{encode_elias1, encode_raw};
use crate::format::{Format, FormatId};
use crate::parse::ParseStep;

// End-marker sentinels that sit one past each format's legal coding range.
const EF8_END_MARKER_ONES: u32 = 16;
const BX0_END_ELIAS_PART: u32 = 129;

/// Encodes a parse of `input` into a wire stream. The parse must satisfy
/// the format's limits; the parsers guarantee this.
pub fn encode(input: &[u8], steps: &[ParseStep], format: &Format) -> BitStream {
    match format.id() {
        FormatId::Lzm => encode_lzm(input, steps, format),
        FormatId::Ef8 | FormatId::E1zx => encode_ef8(input, steps, format),
        FormatId::Bx0 => encode_bx0(input, steps, format),
        FormatId::Bx2 => encode_bx2(input, steps, format),
    }
}

// ── LZM: byte-aligned LZSS ────────────────────────────────────────────────────
//
// Literal run:  (len' << 1) | 1, then len raw bytes.
// Match:        len' << 1, then the offset byte.
// End marker:   a zero control byte.
// len' and the offset byte carry the extend bias (wire value = value − 1).

fn encode_lzm(input: &[u8], steps: &[ParseStep], format: &Format) -> BitStream {
    let extend_offset = u16::from(format.options().extend_offset);
    let extend_length = u16::from(format.options().extend_length);

    let mut stream = BitStream::new();
    let mut cursor = 0usize;

    for step in steps {
        let wire_length = step.length - extend_length;

        if step.offset > 0 {
            stream.write_byte((wire_length << 1) as u8);
            stream.write_byte((step.offset - extend_offset) as u8);
            cursor += usize::from(step.length);
        } else {
            stream.write_byte(((wire_length << 1) | 1) as u8);
            for _ in 0..step.length {
                stream.write_byte(input[cursor]);
                cursor += 1;
            }
        }
    }

    if format.options().end_marker {
        stream.write_byte(0);
    }

    stream
}

// ── EF8 / E1ZX: Elias lengths, 8-bit offset ───────────────────────────────────
//
// Literal run:  γ₁(len), flag 1, then len raw bytes.
// Match:        γ₁(len − 1), flag 0, then the offset byte.
// End marker:   sixteen 1 bits and a 0 — a γ₁ value beyond the 255 ceiling.
// E1ZX writes the identical tokens through the negated stream.

fn encode_ef8(input: &[u8], steps: &[ParseStep], format: &Format) -> BitStream {
    let extend_offset = u16::from(format.options().extend_offset);

    let mut stream = if format.id() == FormatId::E1zx {
        BitStream::new_negated()
    } else {
        BitStream::new()
    };
    let mut cursor = 0usize;

    for step in steps {
        if step.offset > 0 {
            encode_elias1(&mut stream, u32::from(step.length - 1));
            stream.write_bit(false);
            stream.write_byte((step.offset - extend_offset) as u8);
            cursor += usize::from(step.length);
        } else {
            encode_elias1(&mut stream, u32::from(step.length));
            stream.write_bit(true);
            for _ in 0..step.length {
                stream.write_byte(input[cursor]);
                cursor += 1;
            }
        }
    }

    if format.options().end_marker {
        for _ in 0..EF8_END_MARKER_ONES {
            stream.write_bit(true);
        }
        stream.write_bit(false);
    }

    stream.flush();
    stream
}

// ── BX0: flag bit, Elias length, split raw/Elias offset, repeat offset ────────
//
// Every token leads with one flag bit. After a match (or at stream start)
// flag 1 introduces a literal; after a literal it introduces a repeat.
// Flag 0 always introduces an explicit match.
//
// Literal:  1, γ₁(len), then len raw bytes.
// Match:    0, γ₁((w >> 7) + 1), 7 raw bits of w & 127, γ₁(len − 1)
//           where w is the offset minus the extend bias.
// Repeat:   1, γ₁(len).
// End:      0, γ₁(129) — an Elias part beyond the legal 128.

fn encode_bx0(input: &[u8], steps: &[ParseStep], format: &Format) -> BitStream {
    let extend_offset = u16::from(format.options().extend_offset);

    let mut stream = BitStream::new();
    let mut cursor = 0usize;
    let mut prev_literal = false;
    let mut last_offset = 0u16;

    for step in steps {
        if step.offset > 0 {
            if prev_literal && step.offset == last_offset {
                stream.write_bit(true);
                encode_elias1(&mut stream, u32::from(step.length));
            } else {
                stream.write_bit(false);
                let wire = u32::from(step.offset - extend_offset);
                encode_elias1(&mut stream, (wire >> 7) + 1);
                encode_raw(&mut stream, wire & 127, 7);
                encode_elias1(&mut stream, u32::from(step.length - 1));
            }
            last_offset = step.offset;
            prev_literal = false;
            cursor += usize::from(step.length);
        } else {
            stream.write_bit(true);
            encode_elias1(&mut stream, u32::from(step.length));
            for _ in 0..step.length {
                stream.write_byte(input[cursor]);
                cursor += 1;
            }
            prev_literal = true;
        }
    }

    if format.options().end_marker {
        stream.write_bit(false);
        encode_elias1(&mut stream, BX0_END_ELIAS_PART);
    }

    stream.flush();
    stream
}

// ── BX2: Elias lengths, 8-bit offset, repeat offset ───────────────────────────
//
// Tokens lead with γ₁(v) and one flag bit; the flag's meaning depends on
// the previous token, and v is len for literals and repeats but len − 1 for
// explicit matches.
//
// Literal:  γ₁(len), flag 1, then len raw bytes (after a match or at start).
// Repeat:   γ₁(len), flag 1 (after a literal).
// Match:    γ₁(len − 1), flag 0, then the offset byte.
// End:      γ₁(1), flag 0, offset byte 0 — offset zero never occurs.

fn encode_bx2(input: &[u8], steps: &[ParseStep], format: &Format) -> BitStream {
    let mut stream = BitStream::new();
    let mut cursor = 0usize;
    let mut prev_literal = false;
    let mut last_offset = 0u16;

    for step in steps {
        if step.offset > 0 {
            if prev_literal && step.offset == last_offset {
                encode_elias1(&mut stream, u32::from(step.length));
                stream.write_bit(true);
            } else {
                encode_elias1(&mut stream, u32::from(step.length - 1));
                stream.write_bit(false);
                stream.write_byte(step.offset as u8);
            }
            last_offset = step.offset;
            prev_literal = false;
            cursor += usize::from(step.length);
        } else {
            encode_elias1(&mut stream, u32::from(step.length));
            stream.write_bit(true);
            for _ in 0..step.length {
                stream.write_byte(input[cursor]);
                cursor += 1;
            }
            prev_literal = true;
        }
    }

    if format.options().end_marker {
        encode_elias1(&mut stream, 1);
        stream.write_bit(false);
        stream.write_byte(0);
    }

    stream.flush();
    stream
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatOptions;
    use crate::parse::parse_cost;

    fn format_with(id: FormatId, end_marker: bool) -> Format {
        let mut options = FormatOptions::new(id);
        options.end_marker = end_marker;
        Format::new(options).0
    }

    #[test]
    fn lzm_golden_bytes() {
        // One 8-byte literal run: control byte (8 << 1) | 1, then payload.
        let input = [0u8, 1, 2, 3, 4, 5, 6, 7];
        let steps = [ParseStep::new(8, 0)];

        let stream = encode(&input, &steps, &format_with(FormatId::Lzm, false));
        assert_eq!(stream.data(), &[0x11, 0, 1, 2, 3, 4, 5, 6, 7]);

        let stream = encode(&input, &steps, &format_with(FormatId::Lzm, true));
        assert_eq!(stream.data(), &[0x11, 0, 1, 2, 3, 4, 5, 6, 7, 0x00]);
    }

    #[test]
    fn ef8_golden_bytes() {
        // lit(1) then match(7, 1) over eight zero bytes:
        //   γ₁(1)=0, flag 1, payload 0x00, γ₁(6)=11100, flag 0, offset 0x01
        // packs to bit byte 0b0111_1000 with the two data bytes after it.
        let input = [0u8; 8];
        let steps = [ParseStep::new(1, 0), ParseStep::new(7, 1)];

        let stream = encode(&input, &steps, &format_with(FormatId::Ef8, false));
        assert_eq!(stream.data(), &[0x78, 0x00, 0x01]);

        // The end marker appends sixteen ones and a zero.
        let stream = encode(&input, &steps, &format_with(FormatId::Ef8, true));
        assert_eq!(stream.data(), &[0x78, 0x00, 0x01, 0xFF, 0xFF, 0x00]);
    }

    #[test]
    fn e1zx_golden_bytes() {
        // Same tokens as EF8 but every finalized bit byte is negated and the
        // trailing group is one-padded before negation.
        let input = [0u8; 8];
        let steps = [ParseStep::new(1, 0), ParseStep::new(7, 1)];

        let stream = encode(&input, &steps, &format_with(FormatId::E1zx, false));
        assert_eq!(stream.data(), &[0x88, 0x00, 0x01]);
        assert!(!stream.carry_warning());

        let stream = encode(&input, &steps, &format_with(FormatId::E1zx, true));
        assert_eq!(stream.data(), &[0x88, 0x00, 0x01, 0x01, 0x01, 0x81]);
    }

    #[test]
    fn bx2_golden_bytes() {
        // lit(2) "ab" then match(8, 2):
        //   γ₁(2)=100, flag 1 | γ₁(7)=11110, flag 0, offset byte 2.
        let input = b"ababababab";
        let steps = [ParseStep::new(2, 0), ParseStep::new(8, 2)];

        let stream = encode(input, &steps, &format_with(FormatId::Bx2, false));
        assert_eq!(stream.data(), &[0x9F, 0x61, 0x62, 0x00, 0x02]);

        let stream = encode(input, &steps, &format_with(FormatId::Bx2, true));
        assert_eq!(stream.data(), &[0x9F, 0x61, 0x62, 0x00, 0x02, 0x00]);
    }

    #[test]
    fn bx0_golden_bytes() {
        // lit(2) "ab" then match(8, 2):
        //   1, γ₁(2)=100 | 0, γ₁(1)=0, 0000010, γ₁(7)=11110.
        let input = b"ababababab";
        let steps = [ParseStep::new(2, 0), ParseStep::new(8, 2)];

        let stream = encode(input, &steps, &format_with(FormatId::Bx0, false));
        assert_eq!(stream.data(), &[0xC0, 0x61, 0x62, 0x17, 0x80]);
    }

    #[test]
    fn bx2_repeat_collapses_the_offset_byte() {
        // lit(8), match(3, 8), lit(1), match(4, 8): the final match follows
        // a literal at the previous offset, so it is written as a repeat and
        // the stream carries exactly two offset bytes.
        let input = b"abcdefghabcXefgh";
        let steps = [
            ParseStep::new(8, 0),
            ParseStep::new(3, 8),
            ParseStep::new(1, 0),
            ParseStep::new(4, 8),
        ];
        let f = format_with(FormatId::Bx2, false);
        let stream = encode(input, &steps, &f);

        // Cost model and emission agree bit for bit.
        assert_eq!(stream.bit_count(), parse_cost(&steps, &f));

        // Changing the offset forces the explicit form and costs one byte.
        let mut explicit = steps;
        explicit[3] = ParseStep::new(4, 7);
        let explicit_stream = encode(input, &explicit, &f);
        assert_eq!(explicit_stream.len(), stream.len() + 1);
    }

    #[test]
    fn bit_counts_match_costs_for_every_format() {
        let input = b"abcdefghabcXefgh";
        let steps = [
            ParseStep::new(8, 0),
            ParseStep::new(3, 8),
            ParseStep::new(1, 0),
            ParseStep::new(4, 8),
        ];
        for id in [FormatId::Lzm, FormatId::Ef8, FormatId::E1zx, FormatId::Bx0, FormatId::Bx2] {
            let f = format_with(id, false);
            let stream = encode(input, &steps, &f);
            assert_eq!(stream.bit_count(), parse_cost(&steps, &f), "{}", id.name());
        }
    }
}
