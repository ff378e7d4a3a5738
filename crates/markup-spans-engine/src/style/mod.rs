//! The style record carried by every run, and the seam that decides what a
//! format does to it.

pub mod resolver;

use bitflags::bitflags;
use markup_spans_syntax::MarkerType;

pub use resolver::{LayeredStyleResolver, StyleLayer, StylePatch, StyleResolver, default_style};

/// Font size used for markers that are faded out completely.
///
/// Not zero, so layout engines that reject empty glyphs keep the characters.
pub const HIDDEN_FONT_SIZE: f32 = 0.01;

/// RGB colour with a fractional alpha channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const LINK_BLUE: Color = Color::rgb(25, 118, 210);
    pub const CODE_BACKGROUND: Color = Color::rgba(127, 127, 127, 0.15);
    pub const HIGHLIGHT_YELLOW: Color = Color::rgba(255, 230, 0, 0.4);

    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Multiplies the alpha channel by `factor`, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn scale_alpha(self, factor: f32) -> Self {
        Self {
            a: (self.a * clamp_unit(factor)).clamp(0.0, 1.0),
            ..self
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

bitflags! {
    /// Line decorations. Nested formats add to these, never remove.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Decorations: u8 {
        const UNDERLINE = 1;
        const STRIKETHROUGH = 1 << 1;
    }
}

/// CSS-style numeric font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const BOLD: FontWeight = FontWeight(700);
}

impl Default for FontWeight {
    fn default() -> Self {
        FontWeight::NORMAL
    }
}

/// Visual attributes of a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub italic: bool,
    pub decorations: Decorations,
    pub color: Color,
    pub background: Option<Color>,
    pub monospace: bool,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            font_weight: FontWeight::NORMAL,
            italic: false,
            decorations: Decorations::empty(),
            color: Color::BLACK,
            background: None,
            monospace: false,
        }
    }
}

impl TextStyle {
    #[must_use]
    pub fn with_decoration(mut self, decoration: Decorations) -> Self {
        self.decorations |= decoration;
        self
    }
}

/// Anything that changes the style of the text it encloses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Marker(MarkerType),
    /// Display text of a `[text](url)` link.
    Link,
}

impl From<MarkerType> for FormatKind {
    fn from(marker: MarkerType) -> Self {
        FormatKind::Marker(marker)
    }
}

impl FormatKind {
    #[must_use]
    pub fn is_script(self) -> bool {
        matches!(self, FormatKind::Marker(marker) if marker.is_script())
    }
}

/// Clamps a fraction to `0.0..=1.0`, mapping NaN to zero.
#[must_use]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
