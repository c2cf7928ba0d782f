//! Parse representation and parser selection.
//!
//! Formats without a repeat-offset token have position-only token costs and
//! use the shortest-path sweep. Formats with one need the full
//! `(position, repeat-offset)` state space; the best-first parser covers it
//! in production, and the exhaustive sweep is the reference implementation
//! of the same space (the test suite holds the two to the same total cost).

pub mod dijkstra;
pub mod exhaustive;
pub mod shortest_path;

pub use dijkstra::DijkstraParser;
pub use exhaustive::ExhaustiveParser;

use crate::format::Format;

/// One token of a parse. `offset == 0` is a literal run of `length` bytes;
/// `offset > 0` copies `length` bytes from `length` bytes behind the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseStep {
    pub length: u16,
    pub offset: u16,
}

impl ParseStep {
    pub fn new(length: u16, offset: u16) -> Self {
        ParseStep { length, offset }
    }

    pub fn is_literal(&self) -> bool {
        self.offset == 0
    }
}

/// Produces a cost-optimal parse of `input` under `format`'s cost model.
///
/// The input must be non-empty; size validation happens at the compression
/// driver.
pub fn parse(input: &[u8], format: &Format) -> Vec<ParseStep> {
    if format.has_rep_token() {
        DijkstraParser::new(input, format).parse()
    } else {
        shortest_path::parse(input, format)
    }
}

/// Total cost of a parse in bits, priced exactly the way the encoder emits
/// it: a match becomes a repeat when the previous step was a literal and the
/// offset equals the last explicitly coded one.
pub fn parse_cost(steps: &[ParseStep], format: &Format) -> u64 {
    let mut total = 0u64;
    let mut prev_literal = false;
    let mut last_offset = 0u16;

    for step in steps {
        if step.offset > 0 {
            let cost = if format.has_rep_token() && prev_literal && step.offset == last_offset {
                format.rep_match_cost(step.length)
            } else {
                format.match_cost(step.length, step.offset)
            };
            total += u64::from(cost);
            last_offset = step.offset;
            prev_literal = false;
        } else {
            total += u64::from(format.literal_cost(step.length));
            prev_literal = true;
        }
    }

    total
}

/// Expands a parse back into bytes; used by tests to check parses without
/// going through the wire encoding.
#[cfg(test)]
pub(crate) fn expand(input: &[u8], steps: &[ParseStep]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut cursor = 0usize;

    for step in steps {
        let len = usize::from(step.length);
        if step.offset == 0 {
            out.extend_from_slice(&input[cursor..cursor + len]);
        } else {
            for _ in 0..len {
                out.push(out[out.len() - usize::from(step.offset)]);
            }
        }
        cursor += len;
    }

    out
}
