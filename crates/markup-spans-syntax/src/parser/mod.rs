//! # Parser - From Tokens to Valid Pairs
//!
//! The parser runs after the lexer and decides which markers actually
//! format something:
//!
//! ```text
//! tokens → identify_pairs → candidates → validate_pairs → valid pairs
//!        → resolve_links → drop pairs crossing link text → ParsedText
//! ```
//!
//! ## Stages
//!
//! - [`pairs`]: per-type toggling into a symmetric [`PairMap`]. Cheap and
//!   context-free; it happily pairs markers that cross.
//! - [`nesting`]: keeps properly nested pairs within the nesting limit.
//!   Crossing pairs are both dropped, an over-deep pair alone.
//! - [`links`]: finds complete `[text](url)` structures and removes pairs
//!   that straddle a link's display text.
//!
//! Nothing here fails. Markers that end up unpaired are still in
//! [`ParsedText::tokens`] and render as literal text.
//!
//! ```
//! use markup_spans_syntax::parse;
//!
//! let parsed = parse("**bold**");
//! assert_eq!(parsed.pairs.get(0), Some(2));
//! assert_eq!(parsed.pairs.get(2), Some(0));
//! ```

pub mod links;
pub mod nesting;
pub mod pairs;

use crate::alphabet::DEFAULT_MAX_NESTING_DEPTH;
use crate::lexer::tokenize;
use crate::token::Token;
use links::{LinkSpan, drop_pairs_crossing_links, resolve_links};
use nesting::validate_pairs;
use pairs::{PairMap, identify_pairs};

/// Everything derived from one input string.
///
/// This is what caches store: it depends on nothing but the text and the
/// nesting limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedText {
    pub tokens: Vec<Token>,
    /// Valid pairs only.
    pub pairs: PairMap,
    /// Complete links, ordered by their `[` index.
    pub links: Vec<LinkSpan>,
}

impl ParsedText {
    /// The link whose `[` is token `index`, if that token opens a complete link.
    #[must_use]
    pub fn link_starting_at(&self, index: usize) -> Option<&LinkSpan> {
        self.links
            .binary_search_by_key(&index, |link| link.start)
            .ok()
            .map(|i| &self.links[i])
    }

    /// The link covering token `index`, from `[` to `)` inclusive.
    #[must_use]
    pub fn link_covering(&self, index: usize) -> Option<&LinkSpan> {
        let i = self.links.partition_point(|link| link.start <= index);
        let link = self.links.get(i.checked_sub(1)?)?;
        link.covers(index).then_some(link)
    }
}

/// Parses `text` with the default nesting limit.
pub fn parse(text: &str) -> ParsedText {
    parse_with_depth(text, DEFAULT_MAX_NESTING_DEPTH)
}

/// Parses `text`, keeping pairs up to nesting level `max_depth`.
pub fn parse_with_depth(text: &str, max_depth: usize) -> ParsedText {
    let tokens = tokenize(text);
    let candidates = identify_pairs(&tokens);
    let mut pairs = validate_pairs(&tokens, &candidates, max_depth);
    let links = resolve_links(&tokens);
    drop_pairs_crossing_links(&mut pairs, &links);

    ParsedText {
        tokens,
        pairs,
        links,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marker::MarkerType;
    use crate::token::TokenKind;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    #[test]
    fn bold_scenario() {
        let parsed = parse("**bold**");
        assert_eq!(parsed.tokens.len(), 3);
        assert_eq!(parsed.tokens[0].marker_type(), Some(MarkerType::Bold));
        assert_eq!(parsed.tokens[0].position(), 0);
        assert_eq!(parsed.tokens[0].len(), 2);
        assert_eq!(parsed.tokens[1].kind, TokenKind::Text("bold".into()));
        assert_eq!(parsed.tokens[2].position(), 6);
        assert_eq!(parsed.pairs.pairs().collect::<Vec<_>>(), vec![(0, 2)]);
    }

    #[test]
    fn link_lookup() {
        // 0 "see ", 1 `[`, 2 "a", 3 `](`, 4 "b", 5 `)`, 6 " then"
        let parsed = parse("see [a](b) then");
        assert!(parsed.link_starting_at(1).is_some());
        assert!(parsed.link_starting_at(0).is_none());
        assert_eq!(parsed.link_covering(4).map(|l| l.start), Some(1));
        assert!(parsed.link_covering(6).is_none());
        assert!(parsed.link_covering(0).is_none());
    }

    #[test]
    fn formatting_inside_link_text_is_kept() {
        // 0 `[`, 1 `*`, 2 "a", 3 `*`, 4 `](`, 5 "u", 6 `)`
        let parsed = parse("[*a*](u)");
        assert_eq!(parsed.pairs.get(1), Some(3));
    }

    fn marker_input() -> impl Strategy<Value = String> {
        proptest::collection::vec(
            proptest::sample::select(vec![
                "*", "**", "_", "~~", "~", "`", "==", "++", "^", "[", "](", ")", "{k}", "\\",
                "a", " ", "é",
            ]),
            0..40,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn valid_pairs_are_symmetric(input in marker_input()) {
            let parsed = parse(&input);
            for (open, close) in parsed.pairs.pairs() {
                prop_assert_eq!(parsed.pairs.get(close), Some(open));
                prop_assert_eq!(
                    parsed.tokens[open].marker_type(),
                    parsed.tokens[close].marker_type()
                );
            }
        }

        #[test]
        fn valid_pairs_never_cross(input in marker_input()) {
            let parsed = parse(&input);
            let pairs: Vec<_> = parsed.pairs.pairs().collect();
            for &(a, b) in &pairs {
                for &(c, d) in &pairs {
                    let crossing = a < c && c < b && b < d;
                    prop_assert!(!crossing, "({a},{b}) crosses ({c},{d})");
                }
            }
        }

        #[test]
        fn nesting_level_is_bounded(input in marker_input(), max_depth in 1usize..4) {
            let parsed = parse_with_depth(&input, max_depth);
            let pairs: Vec<_> = parsed.pairs.pairs().collect();
            for &(a, b) in &pairs {
                let enclosing = pairs.iter().filter(|&&(c, d)| c < a && b < d).count();
                prop_assert!(enclosing < max_depth);
            }
        }

        #[test]
        fn spans_tile_the_input(input in marker_input()) {
            let parsed = parse(&input);
            let mut pos = 0;
            for token in &parsed.tokens {
                prop_assert_eq!(token.span.start, pos);
                pos = token.span.end;
            }
            prop_assert_eq!(pos, input.len());
        }
    }
}
