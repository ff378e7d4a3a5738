//! # markup-spans-engine
//!
//! Turns inline markup into styled runs for a UI to lay out.
//!
//! ```text
//! text → MarkupParser (LRU cache → markup-spans-syntax::parse) → ParsedText
//!      → RichSpanBuilder  → InlineRun<E>   read-only display
//!      → EditSpanBuilder  → TextRun        live text fields, byte for byte
//! ```
//!
//! Styling is delegated: builders fold a [`StyleResolver`] over the formats
//! open at each point, innermost last. [`LayeredStyleResolver`] provides
//! nearest-first override layers over built-in defaults.
//!
//! Nothing here fails on input. Malformed markup renders as literal text;
//! the only errors are cache limits that can never work
//! ([`CacheConfigError`]).
//!
//! ```
//! use markup_spans_engine::{EditSpanBuilder, LayeredStyleResolver, TextStyle};
//!
//! let builder = EditSpanBuilder::new();
//! let runs = builder.build("hi **bold** bye", &TextStyle::default(), &LayeredStyleResolver::default(), Some(0), 0.0);
//! let text: String = runs.iter().map(|run| run.text.as_str()).collect();
//! assert_eq!(text, "hi **bold** bye");
//! ```

pub mod cache;
pub mod parser;
pub mod render;
pub mod style;

pub use cache::{CacheConfigError, CacheStats, ParseCache};
pub use parser::MarkupParser;
pub use render::{
    InlineRun, LinkHandler, PlaceholderSource, TextRun,
    edit::{DEFAULT_MARKER_OPACITY, EditSpanBuilder},
    format_stack::{FormatEntry, FormatStack},
    plain::to_plain_text,
    rich::RichSpanBuilder,
};
pub use style::{
    Color, Decorations, FontWeight, FormatKind, HIDDEN_FONT_SIZE, LayeredStyleResolver,
    StyleLayer, StylePatch, StyleResolver, TextStyle, default_style,
};

pub use markup_spans_syntax::{MarkerType, ParsedText, has_markup, parse};
