//! Consumer-side validation of link structure.
//!
//! The lexer emits `[`, `](` and `)` as structural tokens without knowing
//! whether the link will ever be completed. Only full `[text](url)` runs are
//! links; every other structural token renders as literal text.

use crate::parser::pairs::PairMap;
use crate::token::{Token, TokenKind};

/// Token indices of a well-formed `[text](url)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSpan {
    /// Index of the `[` token.
    pub start: usize,
    /// Index of the `](` token.
    pub separator: usize,
    /// Index of the `)` token.
    pub end: usize,
}

impl LinkSpan {
    /// True if token `index` is part of the display text.
    #[must_use]
    pub fn in_text(&self, index: usize) -> bool {
        index > self.start && index < self.separator
    }

    /// True if token `index` lies anywhere from `[` to `)`.
    #[must_use]
    pub fn covers(&self, index: usize) -> bool {
        index >= self.start && index <= self.end
    }

    /// Indices of the URL tokens between `](` and `)`.
    pub fn url_tokens(&self) -> std::ops::Range<usize> {
        self.separator + 1..self.end
    }
}

/// Finds complete links, ordered by their `[` index.
///
/// A later `[` restarts the attempt, so in `[a [b](c)` only `[b](c)` is a
/// link.
pub fn resolve_links(tokens: &[Token]) -> Vec<LinkSpan> {
    let mut links = Vec::new();
    let mut start = None;
    let mut separator = None;

    for (index, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::LinkStart => {
                start = Some(index);
                separator = None;
            }
            TokenKind::LinkSeparator => {
                if start.is_some() && separator.is_none() {
                    separator = Some(index);
                }
            }
            TokenKind::LinkEnd => {
                if let (Some(start), Some(separator)) = (start.take(), separator.take()) {
                    links.push(LinkSpan {
                        start,
                        separator,
                        end: index,
                    });
                }
            }
            TokenKind::Text(_) | TokenKind::Marker { .. } | TokenKind::Placeholder(_) => {}
        }
    }

    links
}

/// Drops pairs with exactly one end inside a link's display text.
///
/// A link renders as one unit, so formatting may wrap the whole link or live
/// entirely inside its text, but not straddle its edge.
pub fn drop_pairs_crossing_links(pairs: &mut PairMap, links: &[LinkSpan]) {
    if links.is_empty() {
        return;
    }
    let crossing: Vec<usize> = pairs
        .pairs()
        .filter(|&(open, close)| {
            links
                .iter()
                .any(|link| link.in_text(open) != link.in_text(close))
        })
        .map(|(open, _)| open)
        .collect();
    for open in crossing {
        log::debug!("dropping pair opened at {open}: crosses a link boundary");
        pairs.remove(open);
    }
}
