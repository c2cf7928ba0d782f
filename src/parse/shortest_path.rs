//! Shortest-path parser for formats whose token cost depends only on
//! position (no repeat-offset state).
//!
//! One node per input position plus a terminal node. The forward sweep
//! relaxes every literal run and every match leaving each position; the
//! backward pass walks the incoming tokens from the terminal node and
//! reverses them. On equal cost a literal overwrites the incumbent, which
//! keeps the resulting streams free of needless offsets; matches only ever
//! improve strictly, and the matcher's most-recent-first order means the
//! smallest offset wins among equally priced matches.

use crate::format::{Format, INFINITE_COST};
use crate::matcher::PrefixMatcher;
use crate::parse::ParseStep;

#[derive(Clone, Copy)]
struct Node {
    cost: u32,
    // Incoming token; length 0 marks an unreached node.
    length: u16,
    offset: u16,
}

/// Produces a cost-optimal parse for a format without a repeat token.
pub fn parse(input: &[u8], format: &Format) -> Vec<ParseStep> {
    let n = input.len();

    let matcher = PrefixMatcher::new(
        input,
        format.min_match_length(),
        format.max_match_length(),
        format.max_match_offset(),
    );

    let mut nodes = vec![Node { cost: INFINITE_COST, length: 0, offset: 0 }; n + 1];
    nodes[0].cost = 0;

    let mut matches = Vec::new();

    // Forward sweep.

    for pos in 0..n {
        let base_cost = nodes[pos].cost;

        let max_literal = (n - pos).min(usize::from(format.max_literal_length()));
        for length in 1..=max_literal {
            let cost = base_cost + format.literal_cost(length as u16);

            // Prefer literals over matches when the cost is the same.
            if cost <= nodes[pos + length].cost {
                nodes[pos + length] = Node { cost, length: length as u16, offset: 0 };
            }
        }

        matcher.get_matches(&mut matches, pos, false);

        for m in &matches {
            let target = pos + usize::from(m.length);
            let cost = base_cost + format.match_cost(m.length, m.offset);

            if cost < nodes[target].cost {
                nodes[target] = Node { cost, length: m.length, offset: m.offset };
            }
        }
    }

    // Backward pass.

    let mut steps = Vec::new();
    let mut pos = n;

    while pos > 0 {
        let node = nodes[pos];
        steps.push(ParseStep::new(node.length, node.offset));
        pos -= usize::from(node.length);
    }

    steps.reverse();
    steps
}
