//! Candidate pairing of marker tokens.
//!
//! Each marker type toggles independently: the first `**` opens, the next
//! `**` closes, regardless of what other markers sit in between. Whether the
//! resulting pairs nest properly is decided by [`super::nesting`].

use crate::marker::MarkerType;
use crate::token::Token;

/// Symmetric map from a token index to the index of its partner.
///
/// `get(i) == Some(j)` holds exactly when `get(j) == Some(i)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairMap {
    partners: Vec<Option<usize>>,
}

impl PairMap {
    /// An empty map for a sequence of `len` tokens.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            partners: vec![None; len],
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<usize> {
        self.partners.get(index).copied().flatten()
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// True if `index` is the opening half of a pair.
    #[must_use]
    pub fn is_open(&self, index: usize) -> bool {
        self.get(index).is_some_and(|partner| partner > index)
    }

    /// Records `a` and `b` as partners of each other.
    pub fn insert(&mut self, a: usize, b: usize) {
        let needed = a.max(b) + 1;
        if self.partners.len() < needed {
            self.partners.resize(needed, None);
        }
        self.partners[a] = Some(b);
        self.partners[b] = Some(a);
    }

    /// Removes `index` and its partner. Returns the partner, if any.
    pub fn remove(&mut self, index: usize) -> Option<usize> {
        let partner = self.get(index)?;
        self.partners[index] = None;
        self.partners[partner] = None;
        Some(partner)
    }

    /// Number of pairs (not indices).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs().count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partners.iter().all(Option::is_none)
    }

    /// `(open, close)` pairs ordered by opening index.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.partners
            .iter()
            .enumerate()
            .filter_map(|(open, partner)| partner.filter(|&close| close > open).map(|c| (open, c)))
    }
}

/// Pairs marker tokens per marker type with a last-opened-first-closed
/// stack.
///
/// The pop is unconditional: a pair that crosses a pair of another type is
/// still recorded here. With one stack per type and strict toggling, a stack
/// never holds more than one index.
pub fn identify_pairs(tokens: &[Token]) -> PairMap {
    let mut stacks: [Vec<usize>; MarkerType::ALL.len()] = Default::default();
    let mut pairs = PairMap::with_len(tokens.len());

    for (index, token) in tokens.iter().enumerate() {
        let Some(marker) = token.marker_type() else {
            continue;
        };
        let stack = &mut stacks[marker.index()];
        match stack.pop() {
            Some(open) => pairs.insert(open, index),
            None => stack.push(index),
        }
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use pretty_assertions::assert_eq;

    fn pair_list(input: &str) -> Vec<(usize, usize)> {
        identify_pairs(&tokenize(input)).pairs().collect()
    }

    #[test]
    fn single_pair() {
        assert_eq!(pair_list("**bold**"), vec![(0, 2)]);
    }

    #[test]
    fn pairs_are_symmetric() {
        let pairs = identify_pairs(&tokenize("*a* and ~~b~~"));
        for (open, close) in pairs.pairs() {
            assert_eq!(pairs.get(open), Some(close));
            assert_eq!(pairs.get(close), Some(open));
            assert!(pairs.is_open(open));
            assert!(!pairs.is_open(close));
        }
        assert_eq!(pairs.len(), 2);
    }

    #[test]
    fn odd_count_leaves_last_unpaired() {
        // `*` a `*` b `*`
        let pairs = identify_pairs(&tokenize("*a*b*"));
        assert_eq!(pairs.pairs().collect::<Vec<_>>(), vec![(0, 2)]);
        assert!(!pairs.contains(4));
    }

    #[test]
    fn crossing_types_still_pair_here() {
        // `**` bold `*` and italic `**` wrong `*`
        assert_eq!(
            pair_list("**bold *and italic** is wrong*"),
            vec![(0, 4), (2, 6)]
        );
    }

    #[test]
    fn different_literals_of_same_type_pair() {
        assert_eq!(pair_list("**mixed__"), vec![(0, 2)]);
    }

    #[test]
    fn text_only_has_no_pairs() {
        assert!(identify_pairs(&tokenize("nothing here")).is_empty());
    }

    #[test]
    fn remove_clears_both_sides() {
        let mut pairs = PairMap::with_len(4);
        pairs.insert(0, 3);
        assert_eq!(pairs.remove(3), Some(0));
        assert!(!pairs.contains(0));
        assert!(pairs.is_empty());
        assert_eq!(pairs.remove(0), None);
    }
}
