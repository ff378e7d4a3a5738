//! Unstyled text of a parse, as a reader of the rich output sees it.

use markup_spans_syntax::{LinkSpan, ParsedText, TokenKind};

/// Drops valid markers and link structure, keeps everything else literal.
///
/// Placeholders stay as `{key}` since there is nothing to substitute them
/// with here.
pub fn to_plain_text(parsed: &ParsedText) -> String {
    let mut out = String::new();
    let mut link: Option<LinkSpan> = None;

    for (i, token) in parsed.tokens.iter().enumerate() {
        if let Some(span) = link
            && i >= span.separator
        {
            if i == span.end {
                link = None;
            }
            continue;
        }
        match &token.kind {
            TokenKind::Marker { .. } if parsed.pairs.contains(i) => {}
            TokenKind::LinkStart if parsed.link_starting_at(i).is_some() => {
                link = parsed.link_starting_at(i).copied();
            }
            _ => out.push_str(&token.literal()),
        }
    }
    out
}
