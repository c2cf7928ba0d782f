//! Exhaustive DP parser over the triangular `(position, repeat-offset)`
//! table; the reference implementation for the state-aware formats.
//!
//! Row `p` holds `1 + min(p − 1, max_offset)` cells: the largest offset a
//! match ending at `p` can carry is `p − 1`, and one slot is reserved for
//! "no repeat offset established yet" (zero).
//!
//! Each cell keeps two arrival entries, one for paths that reached it with
//! a literal and one for paths that reached it with a match. Keeping them
//! separate enforces the token discipline exactly: literals extend only
//! match arrivals, repeats extend only literal arrivals, and regular
//! matches extend the cheapest arrival of either kind at the position.

use crate::format::{Format, INFINITE_COST};
use crate::matcher::PrefixMatcher;
use crate::parse::ParseStep;

#[derive(Clone, Copy)]
struct LitEntry {
    cost: u32,
    // Length of the literal run that arrived here.
    length: u16,
}

#[derive(Clone, Copy)]
struct MatchEntry {
    cost: u32,
    // Length of the match that arrived here; the offset is the cell column.
    length: u16,
    // Repeat-offset column of the predecessor, and which of its entries.
    prev_rep: u16,
    prev_was_literal: bool,
}

#[derive(Clone, Copy)]
struct Cell {
    lit: LitEntry,
    mat: MatchEntry,
}

const EMPTY_CELL: Cell = Cell {
    lit: LitEntry { cost: INFINITE_COST, length: 0 },
    mat: MatchEntry { cost: INFINITE_COST, length: 0, prev_rep: 0, prev_was_literal: false },
};

fn row_width(pos: usize, max_offset: usize) -> usize {
    if pos == 0 {
        1
    } else {
        1 + (pos - 1).min(max_offset)
    }
}

/// Exhaustive parser for formats with a repeat-offset token.
pub struct ExhaustiveParser;

impl ExhaustiveParser {
    pub fn parse(input: &[u8], format: &Format) -> Vec<ParseStep> {
        let n = input.len();
        let max_offset = usize::from(format.max_match_offset());

        let matcher = PrefixMatcher::new(
            input,
            format.min_match_length(),
            format.max_match_length(),
            format.max_match_offset(),
        );

        // Triangular table with per-row offsets.

        let mut row_offsets = Vec::with_capacity(n + 2);
        let mut cell_count = 0usize;
        for pos in 0..=n {
            row_offsets.push(cell_count);
            cell_count += row_width(pos, max_offset);
        }
        row_offsets.push(cell_count);

        let mut cells = vec![EMPTY_CELL; cell_count];

        // The start state behaves like a match arrival so the first token
        // may be a literal; no repeat offset is established.
        cells[0].mat = MatchEntry { cost: 0, length: 0, prev_rep: 0, prev_was_literal: false };

        let mut matches = Vec::new();

        // Forward sweep.

        for pos in 0..n {
            let split = matcher.get_matches(&mut matches, pos, true);

            let width = row_width(pos, max_offset);
            let row = row_offsets[pos];

            // Cheapest arrival of either kind at this position, for regular
            // match propagation (which does not care about the repeat state).
            let mut best_cost = INFINITE_COST;
            let mut best_rep = 0u16;
            let mut best_was_literal = false;

            for rep in 0..width {
                let cell = cells[row + rep];

                if cell.lit.cost < best_cost {
                    best_cost = cell.lit.cost;
                    best_rep = rep as u16;
                    best_was_literal = true;
                }
                if cell.mat.cost < best_cost {
                    best_cost = cell.mat.cost;
                    best_rep = rep as u16;
                    best_was_literal = false;
                }

                // Literals extend match arrivals only.

                if cell.mat.cost != INFINITE_COST {
                    let max_length =
                        (n - pos).min(usize::from(format.max_literal_length()));

                    for length in 1..=max_length {
                        let target = row_offsets[pos + length] + rep;
                        let cost = cell.mat.cost + format.literal_cost(length as u16);

                        if cost < cells[target].lit.cost {
                            cells[target].lit = LitEntry { cost, length: length as u16 };
                        }
                    }
                }

                // Repeats extend literal arrivals only, at the remembered
                // offset. Relaxed before regular matches so an equal-cost
                // regular match cannot displace a repeat.

                if cell.lit.cost != INFINITE_COST && rep > 0 {
                    for m in &matches {
                        if usize::from(m.offset) != rep {
                            continue;
                        }

                        let target = row_offsets[pos + usize::from(m.length)] + rep;
                        let cost = cell.lit.cost.saturating_add(format.rep_match_cost(m.length));

                        if cost < cells[target].mat.cost {
                            cells[target].mat = MatchEntry {
                                cost,
                                length: m.length,
                                prev_rep: rep as u16,
                                prev_was_literal: true,
                            };
                        }
                    }
                }
            }

            // Regular matches extend the cheapest arrival at this position.

            if best_cost != INFINITE_COST {
                for m in &matches[split..] {
                    let target =
                        row_offsets[pos + usize::from(m.length)] + usize::from(m.offset);
                    let cost = best_cost + format.match_cost(m.length, m.offset);

                    if cost < cells[target].mat.cost {
                        cells[target].mat = MatchEntry {
                            cost,
                            length: m.length,
                            prev_rep: best_rep,
                            prev_was_literal: best_was_literal,
                        };
                    }
                }
            }
        }

        // Pick the cheapest final state.

        let final_row = row_offsets[n];
        let final_width = row_width(n, max_offset);

        let mut best_cost = INFINITE_COST;
        let mut best_rep = 0usize;
        let mut best_is_literal = false;

        for rep in 0..final_width {
            let cell = cells[final_row + rep];
            if cell.lit.cost < best_cost {
                best_cost = cell.lit.cost;
                best_rep = rep;
                best_is_literal = true;
            }
            if cell.mat.cost < best_cost {
                best_cost = cell.mat.cost;
                best_rep = rep;
                best_is_literal = false;
            }
        }

        // Backtrack through the arrival entries.

        let mut steps = Vec::new();
        let mut pos = n;
        let mut rep = best_rep;
        let mut is_literal = best_is_literal;

        while pos > 0 {
            let cell = cells[row_offsets[pos] + rep];

            if is_literal {
                let entry = cell.lit;
                steps.push(ParseStep::new(entry.length, 0));
                pos -= usize::from(entry.length);
                // A literal arrival always extends a match arrival in the
                // same repeat column.
                is_literal = false;
            } else {
                let entry = cell.mat;
                steps.push(ParseStep::new(entry.length, rep as u16));
                pos -= usize::from(entry.length);
                rep = usize::from(entry.prev_rep);
                is_literal = entry.prev_was_literal;
            }
        }

        steps.reverse();
        steps
    }
}
