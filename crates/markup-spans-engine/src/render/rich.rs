//! Read-only rendering: formatting applied, markers gone.

use std::ops::Range;

use markup_spans_config::RichConfig;
use markup_spans_syntax::{LinkSpan, MarkerType, ParsedText, TokenKind};

use super::format_stack::{FormatEntry, FormatStack};
use super::{InlineRun, LinkHandler, PlaceholderSource, TextRun, push_inline_run};
use crate::parser::MarkupParser;
use crate::style::{FormatKind, StyleResolver, TextStyle};

/// Builds [`InlineRun`]s for display.
///
/// ```
/// use markup_spans_engine::{InlineRun, LayeredStyleResolver, RichSpanBuilder, TextStyle};
/// use markup_spans_syntax::parse;
///
/// let builder = RichSpanBuilder::<()>::new();
/// let runs = builder.build(&parse("**bold**"), &TextStyle::default(), &LayeredStyleResolver::default());
/// assert!(matches!(&runs[..], [InlineRun::Text(run)] if run.text == "bold"));
/// ```
pub struct RichSpanBuilder<'a, E> {
    link_handler: Option<&'a dyn LinkHandler<E>>,
    placeholders: Option<&'a dyn PlaceholderSource<E>>,
    superscript_rise: f32,
    subscript_drop: f32,
}

impl<E> Default for RichSpanBuilder<'_, E> {
    fn default() -> Self {
        Self::from_config(&RichConfig::default())
    }
}

struct Pass<'p, R: ?Sized> {
    parsed: &'p ParsedText,
    base: &'p TextStyle,
    resolver: &'p R,
}

impl<'a, E> RichSpanBuilder<'a, E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &RichConfig) -> Self {
        Self {
            link_handler: None,
            placeholders: None,
            superscript_rise: config.superscript_rise,
            subscript_drop: config.subscript_drop,
        }
    }

    #[must_use]
    pub fn with_link_handler(mut self, handler: &'a dyn LinkHandler<E>) -> Self {
        self.link_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn with_placeholders(mut self, placeholders: &'a dyn PlaceholderSource<E>) -> Self {
        self.placeholders = Some(placeholders);
        self
    }

    /// Builds runs for already parsed text.
    pub fn build<R: StyleResolver + ?Sized>(
        &self,
        parsed: &ParsedText,
        base: &TextStyle,
        resolver: &R,
    ) -> Vec<InlineRun<E>> {
        let pass = Pass {
            parsed,
            base,
            resolver,
        };
        let mut stack = FormatStack::new();
        self.walk(&pass, 0..parsed.tokens.len(), &mut stack)
    }

    /// Parses `text` through `parser` and builds its runs.
    pub fn build_text<R: StyleResolver + ?Sized>(
        &self,
        parser: &MarkupParser,
        text: &str,
        base: &TextStyle,
        resolver: &R,
    ) -> Vec<InlineRun<E>> {
        self.build(&parser.parse(text), base, resolver)
    }

    fn walk<R: StyleResolver + ?Sized>(
        &self,
        pass: &Pass<'_, R>,
        range: Range<usize>,
        stack: &mut FormatStack,
    ) -> Vec<InlineRun<E>> {
        let tokens = &pass.parsed.tokens;
        let mut out = Vec::new();
        let mut text = String::new();
        let mut i = range.start;

        while i < range.end {
            let token = &tokens[i];
            match &token.kind {
                TokenKind::Text(literal) => text.push_str(literal),
                TokenKind::Marker { marker, .. } => match pass.parsed.pairs.get(i) {
                    Some(close) if close > i => {
                        self.flush(pass, stack, &mut text, &mut out);
                        stack.push(FormatEntry {
                            open: i,
                            close,
                            format: (*marker).into(),
                        });
                    }
                    Some(open) => {
                        self.flush(pass, stack, &mut text, &mut out);
                        stack.remove(open);
                    }
                    None => text.push_str(&token.literal()),
                },
                TokenKind::Placeholder(key) => {
                    match self.placeholders.and_then(|source| source.placeholder(key)) {
                        Some(element) => {
                            self.flush(pass, stack, &mut text, &mut out);
                            let (style, _) = self.current(pass, stack);
                            out.push(InlineRun::Placeholder {
                                key: key.clone(),
                                element,
                                style,
                            });
                        }
                        None => text.push_str(&token.literal()),
                    }
                }
                TokenKind::LinkStart => {
                    if let Some(&link) = pass.parsed.link_starting_at(i) {
                        self.flush(pass, stack, &mut text, &mut out);
                        self.link(pass, link, stack, &mut out);
                        i = link.end + 1;
                        continue;
                    }
                    text.push_str(&token.literal());
                }
                TokenKind::LinkSeparator | TokenKind::LinkEnd => text.push_str(&token.literal()),
            }
            i += 1;
        }

        self.flush(pass, stack, &mut text, &mut out);
        out
    }

    fn link<R: StyleResolver + ?Sized>(
        &self,
        pass: &Pass<'_, R>,
        link: LinkSpan,
        stack: &mut FormatStack,
        out: &mut Vec<InlineRun<E>>,
    ) {
        stack.push(FormatEntry {
            open: link.start,
            close: link.end,
            format: FormatKind::Link,
        });
        let (style, _) = self.current(pass, stack);
        let runs = self.walk(pass, link.start + 1..link.separator, stack);
        stack.remove(link.start);

        let url: String = pass.parsed.tokens[link.url_tokens()]
            .iter()
            .map(|token| token.literal())
            .collect();
        let text: String = runs.iter().map(InlineRun::plain_text).collect();

        match self.link_handler.and_then(|handler| handler.link(&url, &text)) {
            Some(element) => out.push(InlineRun::Link {
                url,
                text,
                runs,
                style,
                element,
            }),
            None => {
                for run in runs {
                    push_inline_run(out, run);
                }
            }
        }
    }

    fn flush<R: StyleResolver + ?Sized>(
        &self,
        pass: &Pass<'_, R>,
        stack: &FormatStack,
        text: &mut String,
        out: &mut Vec<InlineRun<E>>,
    ) {
        if text.is_empty() {
            return;
        }
        let text = std::mem::take(text);
        let (style, baseline_offset) = self.current(pass, stack);
        if stack.has_script() {
            out.push(InlineRun::Script {
                text,
                style,
                baseline_offset,
            });
        } else {
            push_inline_run(out, InlineRun::Text(TextRun { text, style }));
        }
    }

    /// Style and baseline offset of the innermost open format.
    ///
    /// Each script level shifts by a fraction of the font size in effect
    /// before that script applied.
    fn current<R: StyleResolver + ?Sized>(
        &self,
        pass: &Pass<'_, R>,
        stack: &FormatStack,
    ) -> (TextStyle, f32) {
        let mut style = *pass.base;
        let mut offset = 0.0;
        for entry in stack.iter() {
            match entry.format {
                FormatKind::Marker(MarkerType::Superscript) => {
                    offset += self.superscript_rise * style.font_size;
                }
                FormatKind::Marker(MarkerType::Subscript) => {
                    offset -= self.subscript_drop * style.font_size;
                }
                _ => {}
            }
            style = pass.resolver.resolve(entry.format, &style);
        }
        (style, offset)
    }
}
