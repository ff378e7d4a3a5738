//! Style resolution: `format × style so far → style`.
//!
//! The span builders only ever call [`StyleResolver::resolve`], once per
//! enclosing format, innermost last. Where overrides come from is the
//! resolver's business. [`LayeredStyleResolver`] covers the common case of
//! an ordered list of override layers (say widget, then screen, then theme)
//! falling back to [`default_style`].

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::{Color, Decorations, FontWeight, FormatKind, TextStyle};
use markup_spans_syntax::MarkerType;

/// Font size factor for superscript and subscript.
pub const SCRIPT_FONT_SCALE: f32 = 0.7;

/// Decides the style of content inside a format.
///
/// Must be total over [`FormatKind`].
pub trait StyleResolver {
    fn resolve(&self, format: FormatKind, style: &TextStyle) -> TextStyle;
}

impl<F> StyleResolver for F
where
    F: Fn(FormatKind, &TextStyle) -> TextStyle,
{
    fn resolve(&self, format: FormatKind, style: &TextStyle) -> TextStyle {
        self(format, style)
    }
}

/// The built-in look of each format.
#[must_use]
pub fn default_style(format: FormatKind, style: &TextStyle) -> TextStyle {
    let mut out = *style;
    match format {
        FormatKind::Marker(MarkerType::Bold) => out.font_weight = FontWeight::BOLD,
        FormatKind::Marker(MarkerType::Italic) => out.italic = true,
        FormatKind::Marker(MarkerType::BoldItalic) => {
            out.font_weight = FontWeight::BOLD;
            out.italic = true;
        }
        FormatKind::Marker(MarkerType::Strikethrough) => {
            out.decorations |= Decorations::STRIKETHROUGH;
        }
        FormatKind::Marker(MarkerType::Underline) => out.decorations |= Decorations::UNDERLINE,
        FormatKind::Marker(MarkerType::Code) => {
            out.monospace = true;
            out.background = Some(Color::CODE_BACKGROUND);
        }
        FormatKind::Marker(MarkerType::Highlight) => out.background = Some(Color::HIGHLIGHT_YELLOW),
        FormatKind::Marker(MarkerType::Superscript | MarkerType::Subscript) => {
            out.font_size *= SCRIPT_FONT_SCALE;
        }
        FormatKind::Link => {
            out.color = Color::LINK_BLUE;
            out.decorations |= Decorations::UNDERLINE;
        }
    }
    out
}

/// A partial style: every `Some` field replaces, decorations are added.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StylePatch {
    pub font_size: Option<f32>,
    /// Multiplies the font size after `font_size` is applied.
    pub font_scale: Option<f32>,
    pub font_weight: Option<FontWeight>,
    pub italic: Option<bool>,
    pub decorations: Decorations,
    pub color: Option<Color>,
    pub background: Option<Color>,
    pub monospace: Option<bool>,
}

impl StylePatch {
    #[must_use]
    pub fn apply(&self, style: &TextStyle) -> TextStyle {
        let mut out = *style;
        if let Some(size) = self.font_size {
            out.font_size = size;
        }
        if let Some(scale) = self.font_scale {
            out.font_size *= scale;
        }
        if let Some(weight) = self.font_weight {
            out.font_weight = weight;
        }
        if let Some(italic) = self.italic {
            out.italic = italic;
        }
        out.decorations |= self.decorations;
        if let Some(color) = self.color {
            out.color = color;
        }
        if self.background.is_some() {
            out.background = self.background;
        }
        if let Some(monospace) = self.monospace {
            out.monospace = monospace;
        }
        out
    }
}

/// One set of per-format overrides.
#[derive(Debug, Clone, Default)]
pub struct StyleLayer {
    pub name: SmolStr,
    patches: FxHashMap<FormatKind, StylePatch>,
}

impl StyleLayer {
    #[must_use]
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            patches: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn with(mut self, format: impl Into<FormatKind>, patch: StylePatch) -> Self {
        self.set(format, patch);
        self
    }

    pub fn set(&mut self, format: impl Into<FormatKind>, patch: StylePatch) {
        self.patches.insert(format.into(), patch);
    }

    #[must_use]
    pub fn get(&self, format: FormatKind) -> Option<&StylePatch> {
        self.patches.get(&format)
    }
}

/// Override layers ordered nearest-first over [`default_style`].
///
/// For each format the first layer that overrides it wins; layers further
/// out are not consulted for that format.
#[derive(Debug, Clone, Default)]
pub struct LayeredStyleResolver {
    layers: Vec<StyleLayer>,
}

impl LayeredStyleResolver {
    #[must_use]
    pub fn new(layers: Vec<StyleLayer>) -> Self {
        Self { layers }
    }

    /// Adds a layer that takes precedence over every existing one.
    pub fn push_nearest(&mut self, layer: StyleLayer) {
        self.layers.insert(0, layer);
    }

    /// Adds a layer consulted only after every existing one.
    pub fn push_fallback(&mut self, layer: StyleLayer) {
        self.layers.push(layer);
    }

    #[must_use]
    pub fn layers(&self) -> &[StyleLayer] {
        &self.layers
    }
}

impl StyleResolver for LayeredStyleResolver {
    fn resolve(&self, format: FormatKind, style: &TextStyle) -> TextStyle {
        match self.layers.iter().find_map(|layer| layer.get(format)) {
            Some(patch) => patch.apply(style),
            None => default_style(format, style),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn bold() -> FormatKind {
        MarkerType::Bold.into()
    }

    #[test]
    fn defaults_without_layers() {
        let resolver = LayeredStyleResolver::default();
        let base = TextStyle::default();

        assert_eq!(resolver.resolve(bold(), &base).font_weight, FontWeight::BOLD);
        let code = resolver.resolve(MarkerType::Code.into(), &base);
        assert!(code.monospace);
        assert_eq!(code.background, Some(Color::CODE_BACKGROUND));
        let sup = resolver.resolve(MarkerType::Superscript.into(), &base);
        assert_eq!(sup.font_size, base.font_size * SCRIPT_FONT_SCALE);
        let link = resolver.resolve(FormatKind::Link, &base);
        assert_eq!(link.color, Color::LINK_BLUE);
        assert!(link.decorations.contains(Decorations::UNDERLINE));
    }

    #[test]
    fn nearest_layer_wins() {
        let red = Color::rgb(255, 0, 0);
        let green = Color::rgb(0, 255, 0);
        let mut resolver = LayeredStyleResolver::new(vec![StyleLayer::new("theme").with(
            MarkerType::Bold,
            StylePatch {
                color: Some(green),
                ..StylePatch::default()
            },
        )]);
        resolver.push_nearest(StyleLayer::new("widget").with(
            MarkerType::Bold,
            StylePatch {
                color: Some(red),
                ..StylePatch::default()
            },
        ));

        let style = resolver.resolve(bold(), &TextStyle::default());

        assert_eq!(style.color, red);
        // The override replaces the default entirely.
        assert_eq!(style.font_weight, FontWeight::NORMAL);
        assert_eq!(resolver.layers()[0].name, "widget");
    }

    #[test]
    fn fallback_layer_used_when_nearer_layers_are_silent() {
        let mut resolver = LayeredStyleResolver::new(vec![StyleLayer::new("widget")]);
        resolver.push_fallback(StyleLayer::new("theme").with(
            MarkerType::Italic,
            StylePatch {
                font_weight: Some(FontWeight(300)),
                ..StylePatch::default()
            },
        ));

        let style = resolver.resolve(MarkerType::Italic.into(), &TextStyle::default());

        assert_eq!(style.font_weight, FontWeight(300));
        assert!(!style.italic);
    }

    #[test]
    fn nested_decorations_compose_in_any_order() {
        let resolver = LayeredStyleResolver::default();
        let base = TextStyle::default();
        let strike = FormatKind::from(MarkerType::Strikethrough);
        let under = FormatKind::from(MarkerType::Underline);

        let a = resolver.resolve(under, &resolver.resolve(strike, &base));
        let b = resolver.resolve(strike, &resolver.resolve(under, &base));

        assert_eq!(a, b);
        assert_eq!(
            a.decorations,
            Decorations::UNDERLINE | Decorations::STRIKETHROUGH
        );
    }

    #[test]
    fn closures_are_resolvers() {
        let resolver = |format: FormatKind, style: &TextStyle| -> TextStyle {
            match format {
                FormatKind::Link => style.with_decoration(Decorations::STRIKETHROUGH),
                other => default_style(other, style),
            }
        };
        let style = resolver.resolve(FormatKind::Link, &TextStyle::default());
        assert_eq!(style.decorations, Decorations::STRIKETHROUGH);
    }

    #[test]
    fn patch_scale_applies_after_size() {
        let patch = StylePatch {
            font_size: Some(20.0),
            font_scale: Some(0.5),
            ..StylePatch::default()
        };
        assert_eq!(patch.apply(&TextStyle::default()).font_size, 10.0);
    }
}
