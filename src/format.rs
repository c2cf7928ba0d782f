//! Stream formats: identifiers, options, structural limits and cost models.
//!
//! Each format prices its tokens in bits. The cost functions must agree
//! with the encoder bit-for-bit — the test suite checks that the encoded
//! payload length equals the summed step costs for every parse.

use crate::codes::elias1_cost;
use crate::error::Warning;

/// Sentinel cost for tokens a format does not have.
pub const INFINITE_COST: u32 = u32::MAX;

// ── Identifiers and options ───────────────────────────────────────────────────

/// The closed set of supported stream formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatId {
    /// Byte-aligned LZSS: 7-bit length plus flag byte, 8-bit offset.
    Lzm,
    /// Elias-gamma lengths, 8-bit offset.
    Ef8,
    /// EF8 over the negated bit stream, for carry-driven Z80 decoders.
    E1zx,
    /// Elias-gamma lengths, split raw/Elias offset, repeat-offset token.
    Bx0,
    /// Elias-gamma lengths, 8-bit offset, repeat-offset token.
    Bx2,
}

impl FormatId {
    /// Identifier string, also used as the default output-file suffix.
    pub fn name(self) -> &'static str {
        match self {
            FormatId::Lzm => "lzm",
            FormatId::Ef8 => "ef8",
            FormatId::E1zx => "e1zx",
            FormatId::Bx0 => "bx0",
            FormatId::Bx2 => "bx2",
        }
    }
}

/// Format selection plus the option flags gathered from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub id: FormatId,
    /// Compress in reverse order (decoder reads the stream tail-to-head).
    pub reverse: bool,
    /// Append the end-of-stream sentinel.
    pub end_marker: bool,
    /// Extend the maximum window offset by 1 (wire value = offset − 1).
    pub extend_offset: bool,
    /// Extend the maximum block length by 1 (wire value = length − 1).
    pub extend_length: bool,
}

impl FormatOptions {
    pub fn new(id: FormatId) -> Self {
        FormatOptions {
            id,
            reverse: false,
            end_marker: false,
            extend_offset: false,
            extend_length: false,
        }
    }
}

// ── Format ────────────────────────────────────────────────────────────────────

/// A format with its normalized options and derived structural limits.
///
/// Construction clears options the format cannot express and reports each
/// as a [`Warning`], so the limits and cost functions below never see an
/// unsupported flag.
#[derive(Debug, Clone)]
pub struct Format {
    options: FormatOptions,

    max_literal_length: u16,
    min_match_length: u16,
    max_match_length: u16,
    max_match_offset: u16,

    supports_extend_offset: bool,
    supports_extend_length: bool,
    has_rep_token: bool,
}

impl Format {
    pub fn new(options: FormatOptions) -> (Self, Vec<Warning>) {
        let (supports_extend_offset, supports_extend_length, has_rep_token) = match options.id {
            FormatId::Lzm => (true, true, false),
            FormatId::Ef8 => (true, false, false),
            FormatId::E1zx => (true, false, false),
            FormatId::Bx0 => (true, false, true),
            FormatId::Bx2 => (false, false, true),
        };

        let mut warnings = Vec::new();
        let mut options = options;

        if options.extend_offset && !supports_extend_offset {
            warnings.push(Warning::OptionIgnored { option: "-o", format: options.id.name() });
            options.extend_offset = false;
        }
        if options.extend_length && !supports_extend_length {
            warnings.push(Warning::OptionIgnored { option: "-l", format: options.id.name() });
            options.extend_length = false;
        }

        let eo = u16::from(options.extend_offset);
        let el = u16::from(options.extend_length);

        let (max_literal_length, min_match_length, max_match_length, max_match_offset) =
            match options.id {
                FormatId::Lzm => (127 + el, 2, 127 + el, 255 + eo),
                FormatId::Ef8 | FormatId::E1zx => (255, 2, 256, 255 + eo),
                FormatId::Bx0 => (0xFFFF, 2, 0xFFFF, 0x3FFF + eo),
                FormatId::Bx2 => (0xFFFF, 2, 0xFFFF, 255),
            };

        let format = Format {
            options,
            max_literal_length,
            min_match_length,
            max_match_length,
            max_match_offset,
            supports_extend_offset,
            supports_extend_length,
            has_rep_token,
        };

        (format, warnings)
    }

    pub fn id(&self) -> FormatId {
        self.options.id
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    pub fn max_literal_length(&self) -> u16 {
        self.max_literal_length
    }

    pub fn min_match_length(&self) -> u16 {
        self.min_match_length
    }

    pub fn max_match_length(&self) -> u16 {
        self.max_match_length
    }

    pub fn max_match_offset(&self) -> u16 {
        self.max_match_offset
    }

    /// True for formats with a repeat-offset token; selects the state-aware
    /// parser.
    pub fn has_rep_token(&self) -> bool {
        self.has_rep_token
    }

    pub fn supports_extend_offset(&self) -> bool {
        self.supports_extend_offset
    }

    pub fn supports_extend_length(&self) -> bool {
        self.supports_extend_length
    }

    // ── Cost model ───────────────────────────────────────────────────────────

    /// Bits for a literal run of `length` bytes, including the length code,
    /// flags and the raw payload.
    pub fn literal_cost(&self, length: u16) -> u32 {
        let length = u32::from(length);
        match self.options.id {
            FormatId::Lzm => 8 + (length << 3),
            FormatId::Ef8 | FormatId::E1zx | FormatId::Bx2 => {
                elias1_cost(length) + 1 + (length << 3)
            }
            FormatId::Bx0 => 1 + elias1_cost(length) + (length << 3),
        }
    }

    /// Bits for a back-reference of `length` bytes at `offset`.
    pub fn match_cost(&self, length: u16, offset: u16) -> u32 {
        let length = u32::from(length);
        match self.options.id {
            FormatId::Lzm => 8 + 8,
            FormatId::Ef8 | FormatId::E1zx | FormatId::Bx2 => elias1_cost(length - 1) + 1 + 8,
            FormatId::Bx0 => {
                // The Elias part is derived from the wire value, so the cost
                // stays exact at the 7-bit boundary when -o is active.
                let wire = u32::from(offset - u16::from(self.options.extend_offset));
                1 + elias1_cost((wire >> 7) + 1) + 7 + elias1_cost(length - 1)
            }
        }
    }

    /// Bits for a repeat-offset back-reference of `length` bytes, or
    /// [`INFINITE_COST`] for formats without the token.
    pub fn rep_match_cost(&self, length: u16) -> u32 {
        let length = u32::from(length);
        match self.options.id {
            FormatId::Lzm | FormatId::Ef8 | FormatId::E1zx => INFINITE_COST,
            FormatId::Bx0 => 1 + elias1_cost(length),
            FormatId::Bx2 => elias1_cost(length) + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(id: FormatId) -> Format {
        Format::new(FormatOptions::new(id)).0
    }

    #[test]
    fn lzm_limits_and_costs() {
        let f = format(FormatId::Lzm);
        assert_eq!(f.max_literal_length(), 127);
        assert_eq!(f.min_match_length(), 2);
        assert_eq!(f.max_match_length(), 127);
        assert_eq!(f.max_match_offset(), 255);
        assert!(!f.has_rep_token());

        assert_eq!(f.literal_cost(1), 16);
        assert_eq!(f.literal_cost(8), 8 + 64);
        assert_eq!(f.match_cost(2, 10), 16);
        assert_eq!(f.rep_match_cost(3), INFINITE_COST);
    }

    #[test]
    fn lzm_extend_options_shift_limits() {
        let mut options = FormatOptions::new(FormatId::Lzm);
        options.extend_offset = true;
        options.extend_length = true;
        let (f, warnings) = Format::new(options);
        assert!(warnings.is_empty());
        assert_eq!(f.max_literal_length(), 128);
        assert_eq!(f.max_match_length(), 128);
        assert_eq!(f.max_match_offset(), 256);
    }

    #[test]
    fn ef8_limits_and_costs() {
        let f = format(FormatId::Ef8);
        assert_eq!(f.max_literal_length(), 255);
        assert_eq!(f.max_match_length(), 256);
        assert_eq!(f.max_match_offset(), 255);

        // γ₁(1) + flag + payload = 1 + 1 + 8.
        assert_eq!(f.literal_cost(1), 10);
        // γ₁(6) + flag + offset byte = 5 + 1 + 8.
        assert_eq!(f.match_cost(7, 1), 14);
    }

    #[test]
    fn e1zx_prices_like_ef8() {
        let a = format(FormatId::Ef8);
        let b = format(FormatId::E1zx);
        for len in 1..=20u16 {
            assert_eq!(a.literal_cost(len), b.literal_cost(len));
            if len >= 2 {
                assert_eq!(a.match_cost(len, 5), b.match_cost(len, 5));
            }
        }
    }

    #[test]
    fn bx0_split_offset_cost() {
        let f = format(FormatId::Bx0);
        assert_eq!(f.max_match_offset(), 0x3FFF);
        assert!(f.has_rep_token());

        // offset 1: eliasPart = 1 → 1 + γ₁(1) + 7 + γ₁(len-1).
        assert_eq!(f.match_cost(2, 1), 1 + 1 + 7 + 1);
        // offset 128: eliasPart = 2 → γ₁(2) = 3 bits.
        assert_eq!(f.match_cost(2, 128), 1 + 3 + 7 + 1);
        assert_eq!(f.rep_match_cost(1), 1 + 1);
        assert_eq!(f.literal_cost(2), 1 + 3 + 16);
    }

    #[test]
    fn bx0_extend_offset_cost_uses_wire_value() {
        let mut options = FormatOptions::new(FormatId::Bx0);
        options.extend_offset = true;
        let (f, _) = Format::new(options);
        assert_eq!(f.max_match_offset(), 0x4000);
        // Semantic offset 128 has wire value 127, still in the one-part range.
        assert_eq!(f.match_cost(2, 128), 1 + 1 + 7 + 1);
        // Semantic offset 129 crosses into the two-part range.
        assert_eq!(f.match_cost(2, 129), 1 + 3 + 7 + 1);
    }

    #[test]
    fn bx2_costs() {
        let f = format(FormatId::Bx2);
        assert_eq!(f.max_match_offset(), 255);
        assert!(f.has_rep_token());

        assert_eq!(f.literal_cost(2), 3 + 1 + 16);
        assert_eq!(f.match_cost(8, 2), 5 + 1 + 8);
        assert_eq!(f.rep_match_cost(1), 1 + 1);
        assert_eq!(f.rep_match_cost(4), 5 + 1);
    }

    #[test]
    fn unsupported_options_are_cleared_with_warnings() {
        let mut options = FormatOptions::new(FormatId::Bx2);
        options.extend_offset = true;
        options.extend_length = true;
        let (f, warnings) = Format::new(options);

        assert!(!f.options().extend_offset);
        assert!(!f.options().extend_length);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| matches!(
            w,
            Warning::OptionIgnored { option: "-o", .. }
        )));
        assert!(warnings.iter().any(|w| matches!(
            w,
            Warning::OptionIgnored { option: "-l", .. }
        )));
    }

    #[test]
    fn ef8_ignores_extend_length_only() {
        let mut options = FormatOptions::new(FormatId::Ef8);
        options.extend_offset = true;
        options.extend_length = true;
        let (f, warnings) = Format::new(options);

        assert_eq!(f.max_match_offset(), 256);
        assert_eq!(warnings.len(), 1);
        assert!(matches!(warnings[0], Warning::OptionIgnored { option: "-l", .. }));
    }
}
