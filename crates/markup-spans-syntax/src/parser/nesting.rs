//! Nesting validation of candidate pairs.
//!
//! Candidate pairs come from per-type toggling and may cross each other or
//! stack deeper than the renderer supports. This pass keeps only pairs that
//! nest properly and stay within the maximum nesting level.

use crate::parser::pairs::PairMap;
use crate::token::Token;

/// Filters `candidates` down to properly nested pairs.
///
/// Pairs are visited in order of their opening index while a stack holds the
/// accepted pairs still open at that point:
///
/// - a pair that crosses an open accepted pair invalidates both;
/// - a pair whose nesting level (accepted pairs enclosing it, plus one)
///   exceeds `max_depth` is dropped on its own and does not count as an
///   enclosing pair for later ones.
///
/// Dropped indices are simply absent from the result; the tokens stay.
pub fn validate_pairs(tokens: &[Token], candidates: &PairMap, max_depth: usize) -> PairMap {
    let mut valid = PairMap::with_len(tokens.len());
    let mut open: Vec<(usize, usize)> = Vec::new();

    for (start, end) in candidates.pairs() {
        while open.last().is_some_and(|&(_, close)| close < start) {
            open.pop();
        }

        // Open pairs all contain `start`, so the new pair crosses exactly
        // those that close before it does. They sit at the top of the stack.
        if open.last().is_some_and(|&(_, close)| close < end) {
            while let Some(&(crossed_open, crossed_close)) = open.last() {
                if crossed_close > end {
                    break;
                }
                open.pop();
                valid.remove(crossed_open);
                log::debug!(
                    "dropping crossing pairs ({crossed_open}, {crossed_close}) and ({start}, {end})"
                );
            }
            continue;
        }

        let level = open.len() + 1;
        if level > max_depth {
            log::debug!("dropping pair ({start}, {end}) at nesting level {level} > {max_depth}");
            continue;
        }

        valid.insert(start, end);
        open.push((start, end));
    }

    valid
}
