//! # Lexer - Tokenizing Inline Markup
//!
//! This module turns raw text into the flat token sequence every later stage
//! works on. It runs in two layers:
//!
//! 1. A [Logos]-derived [`RawKind`] lexer splits the input into character
//!    classes: delimiter runs (`***`, `~~`, `++`), brackets, braces, escapes
//!    and plain text runs.
//! 2. [`tokenize`] walks those raw pieces once, left to right, with a tiny
//!    link state machine, and assembles [`Token`]s.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Total by construction
//!
//! Tokenizing never fails. Anything that does not form a marker, a link
//! structure or a placeholder becomes text, and adjacent text is merged:
//!
//! ```
//! use markup_spans_syntax::lexer::tokenize;
//!
//! let tokens = tokenize("2 * 3 = 6");
//! assert_eq!(tokens.len(), 3); // "2 ", `*`, " 3 = 6"
//! ```
//!
//! ## Links are checked downstream
//!
//! `[` always becomes a `LinkStart` token and the lexer never backtracks. If
//! the input ends before `](` and `)` arrive, the structural tokens are left
//! dangling and [`crate::parser::links`] treats them as literal text.
//!
//! ## Offsets
//!
//! Spans are UTF-8 byte offsets into the input. Escape backslashes are inside
//! the span of the text token that holds the escaped character, so a text
//! token's span can be longer than its text.

use logos::Logos;
use smol_str::SmolStr;

use crate::alphabet::has_markup;
use crate::marker::MarkerType;
use crate::token::{Span, Token, TokenKind};

/// Raw character classes produced by the Logos lexer.
///
/// These carry no context: whether `](` separates a link or is just text is
/// decided by [`tokenize`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    #[regex(r"\*+")]
    Stars,

    #[regex(r"_+")]
    Underscores,

    #[regex(r"~+")]
    Tildes,

    #[regex(r"\++")]
    Pluses,

    #[regex(r"=+")]
    Equals,

    #[token("`")]
    Backtick,

    #[token("^")]
    Caret,

    #[token("[")]
    LBracket,

    #[token("](")]
    LinkSeparator,

    #[token("]")]
    RBracket,

    #[token(")")]
    RParen,

    /// A well-formed `{key}`.
    #[regex(r"\{[A-Za-z0-9_]+\}")]
    Placeholder,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    /// A backslash followed by an escapable character.
    #[regex(r"\\[*_~+=`^\[\](){}\\]")]
    Escape,

    /// A backslash that escapes nothing.
    #[token("\\")]
    Backslash,

    /// Anything else, grouped into runs.
    #[regex(r"[^*_~+=`^\[\]{})\\]+")]
    Text,
}

/// Lex the input into raw character classes with their spans.
#[cfg(test)]
fn lex_raw(input: &str) -> Vec<(RawKind, Span)> {
    let mut lexer = RawKind::lexer(input);
    let mut out = Vec::new();
    while let Some(result) = lexer.next() {
        let range = lexer.span();
        // Every byte is covered by `Text`, errors cannot really happen.
        out.push((
            result.unwrap_or(RawKind::Text),
            Span::new(range.start, range.end),
        ));
    }
    out
}

/// Tokenize `text` into markers, link structure, placeholders and text.
///
/// Returns a single text token when `text` contains no marker characters and
/// no tokens at all for empty input.
pub fn tokenize(text: &str) -> Vec<Token> {
    if !has_markup(text) {
        if text.is_empty() {
            return Vec::new();
        }
        return vec![Token::text(Span::new(0, text.len()), text)];
    }

    let mut tokenizer = Tokenizer::default();
    let mut lexer = RawKind::lexer(text);
    while let Some(result) = lexer.next() {
        let range = lexer.span();
        tokenizer.step(
            result.unwrap_or(RawKind::Text),
            Span::new(range.start, range.end),
            lexer.slice(),
        );
    }
    tokenizer.finish()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Mode {
    #[default]
    Normal,
    /// Between `[` and `](`; markers are still recognised.
    LinkText,
    /// Between `](` and `)`; everything is literal.
    LinkUrl,
}

#[derive(Debug, Default)]
struct Tokenizer {
    tokens: Vec<Token>,
    mode: Mode,
    /// Start offset and accumulated text of the text token being built.
    pending: Option<(usize, String)>,
    pending_end: usize,
}

impl Tokenizer {
    fn step(&mut self, kind: RawKind, span: Span, slice: &str) {
        if self.mode == Mode::LinkUrl {
            match kind {
                RawKind::RParen => {
                    self.emit(TokenKind::LinkEnd, span);
                    self.mode = Mode::Normal;
                }
                RawKind::Escape => self.text(span, &slice[1..]),
                _ => self.text(span, slice),
            }
            return;
        }

        match kind {
            RawKind::Stars
            | RawKind::Underscores
            | RawKind::Tildes
            | RawKind::Pluses
            | RawKind::Equals
            | RawKind::Backtick
            | RawKind::Caret => self.delimiter_run(span, slice),
            RawKind::LBracket => {
                self.emit(TokenKind::LinkStart, span);
                self.mode = Mode::LinkText;
            }
            RawKind::LinkSeparator if self.mode == Mode::LinkText => {
                self.emit(TokenKind::LinkSeparator, span);
                self.mode = Mode::LinkUrl;
            }
            RawKind::RBracket => {
                // `]` without `(` ends any link attempt.
                self.mode = Mode::Normal;
                self.text(span, slice);
            }
            RawKind::Placeholder => {
                let key = &slice[1..slice.len() - 1];
                self.emit(TokenKind::Placeholder(SmolStr::new(key)), span);
            }
            RawKind::Escape => self.text(span, &slice[1..]),
            RawKind::LinkSeparator
            | RawKind::RParen
            | RawKind::LBrace
            | RawKind::RBrace
            | RawKind::Backslash
            | RawKind::Text => self.text(span, slice),
        }
    }

    fn delimiter_run(&mut self, span: Span, slice: &str) {
        match MarkerType::from_delimiter(slice) {
            Some((marker, literal)) => {
                self.emit(TokenKind::Marker { marker, literal }, span);
            }
            None => self.text(span, slice),
        }
    }

    fn text(&mut self, span: Span, text: &str) {
        match &mut self.pending {
            Some((_, buf)) => buf.push_str(text),
            None => self.pending = Some((span.start, text.to_owned())),
        }
        self.pending_end = span.end;
    }

    fn emit(&mut self, kind: TokenKind, span: Span) {
        self.flush();
        self.tokens.push(Token { kind, span });
    }

    fn flush(&mut self) {
        if let Some((start, text)) = self.pending.take() {
            self.tokens
                .push(Token::text(Span::new(start, self.pending_end), text));
        }
    }

    fn finish(mut self) -> Vec<Token> {
        self.flush();
        log::trace!("tokenized into {} tokens", self.tokens.len());
        self.tokens
    }
}
