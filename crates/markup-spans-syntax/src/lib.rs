//! # markup-spans-syntax
//!
//! Tokenizer and marker pairing for lightweight inline markup: `**bold**`,
//! `*italic*`, `~~strike~~`, `++underline++`, `==highlight==`, `` `code` ``,
//! `^super^`, `~sub~`, `[links](url)` and `{placeholders}`.
//!
//! ## Architecture Overview
//!
//! ```text
//! Source Text → Lexer → Tokens → Pairing → Candidates → Nesting → Valid pairs
//!               (Logos)          (per-type stacks)      (stack walk)
//! ```
//!
//! ### 1. Lexer ([`lexer`] module)
//!
//! A [Logos] lexer splits the text into character classes; a single pass on
//! top assembles markers, link structure, placeholders and merged text runs.
//! Every byte of the input is inside exactly one token's span.
//!
//! ### 2. Pairing ([`parser::pairs`])
//!
//! One stack per marker type. Markers of a type toggle open and closed
//! strictly in sequence; an odd one out stays unpaired.
//!
//! ### 3. Nesting ([`parser::nesting`])
//!
//! Pairs that cross another pair are dropped together with it; pairs nested
//! deeper than the limit are dropped alone. The result is a symmetric
//! [`PairMap`] of properly nested pairs.
//!
//! ## Quick Start
//!
//! ```
//! use markup_spans_syntax::{parse, MarkerType};
//!
//! let parsed = parse("a **b** c");
//! assert_eq!(parsed.tokens[1].marker_type(), Some(MarkerType::Bold));
//! assert_eq!(parsed.pairs.get(1), Some(3));
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! markup-spans-syntax/
//! ├── lib.rs         # This file - public API and end-to-end tests
//! ├── alphabet.rs    # Marker characters, escapes, shared defaults
//! ├── marker.rs      # MarkerType enum
//! ├── token.rs       # Token, TokenKind, Span
//! ├── lexer.rs       # Logos raw lexer + tokenize()
//! └── parser/
//!     ├── mod.rs     # parse() and ParsedText
//!     ├── pairs.rs   # PairMap and identify_pairs()
//!     ├── nesting.rs # validate_pairs()
//!     └── links.rs   # LinkSpan and resolve_links()
//! ```
//!
//! [Logos]: https://docs.rs/logos

pub mod alphabet;
pub mod lexer;
pub mod marker;
pub mod parser;
pub mod token;

pub use alphabet::{
    DEFAULT_CACHE_CAPACITY, DEFAULT_MAX_CACHE_KEY_LENGTH, DEFAULT_MAX_NESTING_DEPTH, has_markup,
};
pub use lexer::tokenize;
pub use marker::MarkerType;
pub use parser::{
    ParsedText,
    links::LinkSpan,
    pairs::{PairMap, identify_pairs},
    nesting::validate_pairs,
    parse, parse_with_depth,
};
pub use token::{Span, Token, TokenKind};

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    /// One line per token: index, kind, span and partner.
    fn dump(input: &str) -> String {
        let parsed = parse(input);
        let mut out = String::new();
        for (i, token) in parsed.tokens.iter().enumerate() {
            let kind = match &token.kind {
                TokenKind::Text(text) => format!("Text({text:?})"),
                TokenKind::Marker { marker, literal } => format!("Marker({marker}, {literal:?})"),
                TokenKind::LinkStart => "LinkStart".to_string(),
                TokenKind::LinkSeparator => "LinkSeparator".to_string(),
                TokenKind::LinkEnd => "LinkEnd".to_string(),
                TokenKind::Placeholder(key) => format!("Placeholder({key:?})"),
            };
            let partner = parsed
                .pairs
                .get(i)
                .map(|p| format!(" <-> {p}"))
                .unwrap_or_default();
            out.push_str(&format!(
                "{i}: {kind}@{}..{}{partner}\n",
                token.span.start, token.span.end
            ));
        }
        out
    }

    #[test]
    fn snapshot_bold() {
        assert_snapshot!(dump("**bold**"), @r#"
        0: Marker(bold, "**")@0..2 <-> 2
        1: Text("bold")@2..6
        2: Marker(bold, "**")@6..8 <-> 0
        "#);
    }

    #[test]
    fn snapshot_overlapping_markers() {
        assert_snapshot!(dump("**bold *and italic** is wrong*"), @r#"
        0: Marker(bold, "**")@0..2
        1: Text("bold ")@2..7
        2: Marker(italic, "*")@7..8
        3: Text("and italic")@8..18
        4: Marker(bold, "**")@18..20
        5: Text(" is wrong")@20..29
        6: Marker(italic, "*")@29..30
        "#);
    }

    #[test]
    fn snapshot_link_and_placeholder() {
        assert_snapshot!(dump("Hi {name}, [click](https://x.com)"), @r#"
        0: Text("Hi ")@0..3
        1: Placeholder("name")@3..9
        2: Text(", ")@9..11
        3: LinkStart@11..12
        4: Text("click")@12..17
        5: LinkSeparator@17..19
        6: Text("https://x.com")@19..32
        7: LinkEnd@32..33
        "#);
    }

    #[test]
    fn snapshot_depth_limit() {
        assert_snapshot!(dump("**level1 _level2 ~~level3~~_**"), @r#"
        0: Marker(bold, "**")@0..2 <-> 8
        1: Text("level1 ")@2..9
        2: Marker(italic, "_")@9..10 <-> 7
        3: Text("level2 ")@10..17
        4: Marker(strikethrough, "~~")@17..19
        5: Text("level3")@19..25
        6: Marker(strikethrough, "~~")@25..27
        7: Marker(italic, "_")@27..28 <-> 2
        8: Marker(bold, "**")@28..30 <-> 0
        "#);
    }

    #[test]
    fn literal_rendering_reproduces_unpaired_input() {
        let input = "**bold *and italic** is wrong*";
        let parsed = parse(input);
        let rebuilt: String = parsed
            .tokens
            .iter()
            .map(|t| t.literal().into_owned())
            .collect();
        assert_eq!(rebuilt, input);
    }
}
