//! Edit-safe rendering: every byte of the input appears in exactly one run.
//!
//! Markers, link structure and escape backslashes stay visible in a dimmed
//! "marker style" so a text field can keep its caret offsets in the source.
//! With a caret position, markers of formats the caret is not touching fade
//! towards invisible:
//!
//! ```text
//! "hi **bold** bye", caret at 0, fade 0.0
//!  hi ·bold· bye      markers at alpha 0 and near-zero size
//! ```

use std::ops::Range;

use markup_spans_config::Config;
use markup_spans_syntax::alphabet::{ESCAPE, is_escapable};
use markup_spans_syntax::{LinkSpan, ParsedText, Span, TokenKind};

use super::format_stack::{FormatEntry, FormatStack};
use super::{TextRun, push_text_run};
use crate::cache::CacheConfigError;
use crate::parser::MarkupParser;
use crate::style::{Decorations, FormatKind, HIDDEN_FONT_SIZE, StyleResolver, TextStyle, clamp_unit};

/// Alpha multiplier for visible markers.
pub const DEFAULT_MARKER_OPACITY: f32 = 0.35;

/// Builds [`TextRun`]s for a live text field, with its own parse cache.
#[derive(Debug)]
pub struct EditSpanBuilder {
    parser: MarkupParser,
    marker_opacity: f32,
}

impl Default for EditSpanBuilder {
    fn default() -> Self {
        Self::with_parser(MarkupParser::default())
    }
}

/// Where the caret is, relative to the text being built.
#[derive(Debug, Clone, Copy)]
enum Caret {
    /// No caret reported: every marker is active.
    Absent,
    At(usize),
    /// In another segment of the same text.
    Elsewhere,
}

impl EditSpanBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_parser(parser: MarkupParser) -> Self {
        Self {
            parser,
            marker_opacity: DEFAULT_MARKER_OPACITY,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, CacheConfigError> {
        Ok(Self::with_parser(MarkupParser::from_config(config)?)
            .with_marker_opacity(config.edit.marker_opacity))
    }

    #[must_use]
    pub fn with_marker_opacity(mut self, opacity: f32) -> Self {
        self.marker_opacity = clamp_unit(opacity);
        self
    }

    #[must_use]
    pub fn parser(&self) -> &MarkupParser {
        &self.parser
    }

    pub fn clear_cache(&self) {
        self.parser.clear_cache();
    }

    /// Builds runs whose texts concatenate to exactly `text`.
    ///
    /// `cursor` is a byte offset. `marker_fade` only affects markers of
    /// formats not touching the cursor: `1.0` draws them like active markers,
    /// `0.0` hides them. Out of range values are clamped, NaN counts as `0.0`.
    pub fn build<R: StyleResolver + ?Sized>(
        &self,
        text: &str,
        base: &TextStyle,
        resolver: &R,
        cursor: Option<usize>,
        marker_fade: f32,
    ) -> Vec<TextRun> {
        let caret = cursor.map_or(Caret::Absent, Caret::At);
        let mut runs = Vec::new();
        self.build_segment(text, base, resolver, caret, marker_fade, None, &mut runs);
        runs
    }

    /// Like [`EditSpanBuilder::build`], with an IME composing range.
    ///
    /// The text before, inside and after `composing` is parsed separately, so
    /// a pair straddling a boundary renders unpaired until composition ends.
    /// Runs inside the range are underlined. An empty range, or one that is
    /// out of bounds or splits a character, is ignored.
    pub fn build_composing<R: StyleResolver + ?Sized>(
        &self,
        text: &str,
        base: &TextStyle,
        resolver: &R,
        cursor: Option<usize>,
        marker_fade: f32,
        composing: Range<usize>,
    ) -> Vec<TextRun> {
        if composing.is_empty()
            || composing.end > text.len()
            || !text.is_char_boundary(composing.start)
            || !text.is_char_boundary(composing.end)
        {
            log::trace!("ignoring composing range {composing:?}");
            return self.build(text, base, resolver, cursor, marker_fade);
        }

        let segments = [
            (0..composing.start, None),
            (composing.clone(), Some(Decorations::UNDERLINE)),
            (composing.end..text.len(), None),
        ];
        let mut runs = Vec::new();
        let mut cursor_taken = false;
        for (range, decoration) in segments {
            if range.is_empty() {
                continue;
            }
            // The first segment whose closed range holds the cursor takes it.
            let caret = match cursor {
                None => Caret::Absent,
                Some(p) if !cursor_taken && range.start <= p && p <= range.end => {
                    cursor_taken = true;
                    Caret::At(p - range.start)
                }
                Some(_) => Caret::Elsewhere,
            };
            // Segments never merge, so the composing range stays its own runs.
            let mut segment = Vec::new();
            self.build_segment(
                &text[range],
                base,
                resolver,
                caret,
                marker_fade,
                decoration,
                &mut segment,
            );
            runs.append(&mut segment);
        }
        runs
    }

    #[allow(clippy::too_many_arguments)]
    fn build_segment<R: StyleResolver + ?Sized>(
        &self,
        text: &str,
        base: &TextStyle,
        resolver: &R,
        caret: Caret,
        marker_fade: f32,
        decoration: Option<Decorations>,
        runs: &mut Vec<TextRun>,
    ) {
        let parsed = self.parser.parse(text);
        let mut pass = EditPass {
            source: text,
            parsed: &parsed,
            base,
            resolver,
            caret,
            marker_opacity: self.marker_opacity,
            marker_fade: clamp_unit(marker_fade),
            decoration,
            stack: FormatStack::new(),
            runs,
        };
        pass.run();
    }
}

struct EditPass<'p, R: ?Sized> {
    source: &'p str,
    parsed: &'p ParsedText,
    base: &'p TextStyle,
    resolver: &'p R,
    caret: Caret,
    marker_opacity: f32,
    marker_fade: f32,
    decoration: Option<Decorations>,
    stack: FormatStack,
    runs: &'p mut Vec<TextRun>,
}

impl<R: StyleResolver + ?Sized> EditPass<'_, R> {
    fn run(&mut self) {
        let parsed = self.parsed;
        let mut link: Option<LinkSpan> = None;

        for (i, token) in parsed.tokens.iter().enumerate() {
            let source = token.source(self.source);
            match &token.kind {
                TokenKind::Marker { marker, .. } => match parsed.pairs.get(i) {
                    Some(close) if close > i => {
                        self.emit(source, self.marker_style(i, close));
                        self.stack.push(FormatEntry {
                            open: i,
                            close,
                            format: (*marker).into(),
                        });
                    }
                    Some(open) => {
                        self.stack.remove(open);
                        self.emit(source, self.marker_style(open, i));
                    }
                    None => self.emit(source, self.current()),
                },
                TokenKind::LinkStart => match parsed.link_starting_at(i) {
                    Some(&span) => {
                        self.emit(source, self.marker_style(span.start, span.end));
                        self.stack.push(FormatEntry {
                            open: span.start,
                            close: span.end,
                            format: FormatKind::Link,
                        });
                        link = Some(span);
                    }
                    None => self.emit(source, self.current()),
                },
                TokenKind::LinkSeparator | TokenKind::LinkEnd => match link {
                    Some(span) if span.separator == i => {
                        self.stack.remove(span.start);
                        self.emit(source, self.marker_style(span.start, span.end));
                    }
                    Some(span) if span.end == i => {
                        self.emit(source, self.marker_style(span.start, span.end));
                        link = None;
                    }
                    _ => self.emit(source, self.current()),
                },
                TokenKind::Text(_) => match link {
                    Some(span) if i > span.separator => {
                        self.emit(source, self.marker_style(span.start, span.end));
                    }
                    _ => self.text(source, self.current()),
                },
                TokenKind::Placeholder(_) => self.emit(source, self.current()),
            }
        }
    }

    /// Text with escape backslashes split out into marker-styled runs.
    fn text(&mut self, source: &str, style: TextStyle) {
        let bytes = source.as_bytes();
        let mut last = 0;
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] == ESCAPE && bytes.get(i + 1).is_some_and(|&b| is_escapable(b)) {
                self.emit(&source[last..i], style);
                self.emit(&source[i..i + 1], self.visible_marker_style());
                last = i + 1;
                i += 2;
            } else {
                i += 1;
            }
        }
        self.emit(&source[last..], style);
    }

    fn emit(&mut self, text: &str, mut style: TextStyle) {
        if let Some(decoration) = self.decoration {
            style.decorations |= decoration;
        }
        push_text_run(self.runs, text, style);
    }

    fn current(&self) -> TextStyle {
        self.stack.resolve(self.base, self.resolver)
    }

    fn visible_marker_style(&self) -> TextStyle {
        let mut style = *self.base;
        style.color = style.color.scale_alpha(self.marker_opacity);
        style
    }

    /// Style of a marker belonging to the format from token `open` to token
    /// `close`, both inclusive.
    fn marker_style(&self, open: usize, close: usize) -> TextStyle {
        let mut style = self.visible_marker_style();
        let tokens = &self.parsed.tokens;
        let range = Span::new(tokens[open].span.start, tokens[close].span.end);
        let active = match self.caret {
            Caret::Absent => true,
            Caret::At(p) => range.touches(p),
            Caret::Elsewhere => false,
        };
        if !active {
            let fade = self.marker_fade;
            style.color = style.color.scale_alpha(fade);
            style.font_size = style.font_size * fade + HIDDEN_FONT_SIZE * (1.0 - fade);
        }
        style
    }
}
