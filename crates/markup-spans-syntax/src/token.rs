//! The token model produced by the tokenizer.

use smol_str::SmolStr;

use crate::marker::MarkerType;

/// A byte range `[start, end)` into the tokenized text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// True if `pos` lies within the span, both boundaries included.
    #[must_use]
    pub fn touches(self, pos: usize) -> bool {
        pos >= self.start && pos <= self.end
    }

    #[must_use]
    pub fn range(self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// What a token is, plus its kind-specific payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Literal text with escapes resolved, so it can be shorter than the span.
    Text(SmolStr),
    /// A formatting marker and the literal it was written with.
    Marker {
        marker: MarkerType,
        literal: &'static str,
    },
    /// `[`
    LinkStart,
    /// `](`
    LinkSeparator,
    /// `)`
    LinkEnd,
    /// `{key}`; the payload is the key without braces.
    Placeholder(SmolStr),
}

/// A token with its byte span in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub fn text(span: Span, text: impl Into<SmolStr>) -> Self {
        Self {
            kind: TokenKind::Text(text.into()),
            span,
        }
    }

    #[must_use]
    pub fn marker(span: Span, marker: MarkerType, literal: &'static str) -> Self {
        Self {
            kind: TokenKind::Marker { marker, literal },
            span,
        }
    }

    /// Start offset in the original text.
    #[must_use]
    pub fn position(&self) -> usize {
        self.span.start
    }

    /// Length in the original text, including any consumed escapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.span.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    #[must_use]
    pub fn marker_type(&self) -> Option<MarkerType> {
        match self.kind {
            TokenKind::Marker { marker, .. } => Some(marker),
            _ => None,
        }
    }

    /// The slice of `source` this token was read from.
    ///
    /// `source` must be the text the token was produced from.
    #[must_use]
    pub fn source<'a>(&self, source: &'a str) -> &'a str {
        &source[self.span.range()]
    }

    /// The text this token contributes when rendered literally.
    ///
    /// Unlike [`Token::source`] this drops escape backslashes.
    #[must_use]
    pub fn literal(&self) -> std::borrow::Cow<'_, str> {
        use std::borrow::Cow;
        match &self.kind {
            TokenKind::Text(text) => Cow::Borrowed(text.as_str()),
            TokenKind::Marker { literal, .. } => Cow::Borrowed(literal),
            TokenKind::LinkStart => Cow::Borrowed("["),
            TokenKind::LinkSeparator => Cow::Borrowed("]("),
            TokenKind::LinkEnd => Cow::Borrowed(")"),
            TokenKind::Placeholder(key) => Cow::Owned(format!("{{{key}}}")),
        }
    }
}
