//! Turning a [`ParsedText`](markup_spans_syntax::ParsedText) into styled runs.
//!
//! Two builders share the parse but differ in what they keep:
//!
//! - [`rich::RichSpanBuilder`] is for read-only display. Markers and link
//!   URLs disappear; links, placeholders and scripts become atomic runs.
//! - [`edit::EditSpanBuilder`] is for text fields. Every input byte lands in
//!   exactly one run, markers included, so offsets in the field and in the
//!   source agree.

pub mod edit;
pub mod format_stack;
pub mod plain;
pub mod rich;

use std::collections::HashMap;
use std::hash::BuildHasher;

use smol_str::SmolStr;

use crate::style::TextStyle;

/// Contiguous text with one style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub style: TextStyle,
}

impl TextRun {
    #[must_use]
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// One unit of rich output.
///
/// Everything but [`InlineRun::Text`] is atomic: a renderer lays it out as a
/// single indivisible unit.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineRun<E> {
    Text(TextRun),
    /// An interactive link built by the host's link handler.
    Link {
        url: String,
        /// Display text without formatting.
        text: String,
        /// Formatted display text.
        runs: Vec<InlineRun<E>>,
        style: TextStyle,
        element: E,
    },
    /// A substituted `{key}`. `style` is the style in effect at that point,
    /// for the renderer to merge with the element's own.
    Placeholder {
        key: SmolStr,
        element: E,
        style: TextStyle,
    },
    /// Superscript or subscript text. A positive offset raises the baseline.
    Script {
        text: String,
        style: TextStyle,
        baseline_offset: f32,
    },
}

impl<E> InlineRun<E> {
    #[must_use]
    pub fn is_atomic(&self) -> bool {
        !matches!(self, InlineRun::Text(_))
    }

    /// The text this run shows, with placeholders as `{key}`.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            InlineRun::Text(run) => run.text.clone(),
            InlineRun::Link { text, .. } => text.clone(),
            InlineRun::Placeholder { key, .. } => format!("{{{key}}}"),
            InlineRun::Script { text, .. } => text.clone(),
        }
    }
}

/// Builds the interactive element for a link.
///
/// Returning `None` renders the link as plain link-styled text.
pub trait LinkHandler<E> {
    fn link(&self, url: &str, text: &str) -> Option<E>;
}

impl<E, F> LinkHandler<E> for F
where
    F: Fn(&str, &str) -> Option<E>,
{
    fn link(&self, url: &str, text: &str) -> Option<E> {
        self(url, text)
    }
}

/// Supplies elements for `{key}` placeholders. Lookup is exact and
/// case-sensitive; an unknown key renders literally.
pub trait PlaceholderSource<E> {
    fn placeholder(&self, key: &str) -> Option<E>;
}

/// Covers `HashMap` and `FxHashMap` alike.
impl<E: Clone, S: BuildHasher> PlaceholderSource<E> for HashMap<String, E, S> {
    fn placeholder(&self, key: &str) -> Option<E> {
        self.get(key).cloned()
    }
}

/// Appends `text`, extending the last run when it has the same style.
pub(crate) fn push_text_run(runs: &mut Vec<TextRun>, text: &str, style: TextStyle) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.style == style => last.text.push_str(text),
        _ => runs.push(TextRun::new(text, style)),
    }
}

/// Appends `run`, merging plain text into a preceding text run of equal style.
pub(crate) fn push_inline_run<E>(runs: &mut Vec<InlineRun<E>>, run: InlineRun<E>) {
    if let InlineRun::Text(next) = &run {
        if next.text.is_empty() {
            return;
        }
        if let Some(InlineRun::Text(last)) = runs.last_mut()
            && last.style == next.style
        {
            last.text.push_str(&next.text);
            return;
        }
    }
    runs.push(run);
}
