//! Marker types recognised by the tokenizer.

use std::fmt;

/// The formatting a marker toggles.
///
/// Only markers of the same type pair with each other, so `**` may close a
/// run opened by `__`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MarkerType {
    /// `**` or `__`
    Bold,
    /// `*` or `_`
    Italic,
    /// `***` or `___`
    BoldItalic,
    /// `~~`
    Strikethrough,
    /// `` ` ``
    Code,
    /// `++`
    Underline,
    /// `==`
    Highlight,
    /// `^`
    Superscript,
    /// `~`
    Subscript,
}

impl MarkerType {
    pub const ALL: [MarkerType; 9] = [
        MarkerType::Bold,
        MarkerType::Italic,
        MarkerType::BoldItalic,
        MarkerType::Strikethrough,
        MarkerType::Code,
        MarkerType::Underline,
        MarkerType::Highlight,
        MarkerType::Superscript,
        MarkerType::Subscript,
    ];

    /// Dense index, used for the per-type pairing stacks.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Every delimiter run that forms a marker, with the type it toggles.
    pub const DELIMITERS: [(&'static str, MarkerType); 12] = [
        ("*", MarkerType::Italic),
        ("**", MarkerType::Bold),
        ("***", MarkerType::BoldItalic),
        ("_", MarkerType::Italic),
        ("__", MarkerType::Bold),
        ("___", MarkerType::BoldItalic),
        ("~", MarkerType::Subscript),
        ("~~", MarkerType::Strikethrough),
        ("++", MarkerType::Underline),
        ("==", MarkerType::Highlight),
        ("`", MarkerType::Code),
        ("^", MarkerType::Superscript),
    ];

    /// Maps a delimiter run to its marker type and static literal.
    ///
    /// Returns `None` for runs that are literal text (`****`, `~~~`, a lone
    /// `+`, ...).
    #[must_use]
    pub fn from_delimiter(run: &str) -> Option<(Self, &'static str)> {
        Self::DELIMITERS
            .iter()
            .find(|(literal, _)| *literal == run)
            .map(|&(literal, marker)| (marker, literal))
    }

    /// Superscript and subscript shift the baseline when rendered read-only.
    #[must_use]
    pub fn is_script(self) -> bool {
        matches!(self, MarkerType::Superscript | MarkerType::Subscript)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MarkerType::Bold => "bold",
            MarkerType::Italic => "italic",
            MarkerType::BoldItalic => "bold-italic",
            MarkerType::Strikethrough => "strikethrough",
            MarkerType::Code => "code",
            MarkerType::Underline => "underline",
            MarkerType::Highlight => "highlight",
            MarkerType::Superscript => "superscript",
            MarkerType::Subscript => "subscript",
        }
    }
}

impl fmt::Display for MarkerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn indices_are_dense() {
        for (i, marker) in MarkerType::ALL.iter().enumerate() {
            assert_eq!(marker.index(), i);
        }
    }

    #[rstest]
    #[case("*", Some(MarkerType::Italic))]
    #[case("__", Some(MarkerType::Bold))]
    #[case("***", Some(MarkerType::BoldItalic))]
    #[case("****", None)]
    #[case("~", Some(MarkerType::Subscript))]
    #[case("~~", Some(MarkerType::Strikethrough))]
    #[case("~~~", None)]
    #[case("++", Some(MarkerType::Underline))]
    #[case("+", None)]
    #[case("==", Some(MarkerType::Highlight))]
    #[case("===", None)]
    #[case("`", Some(MarkerType::Code))]
    #[case("^", Some(MarkerType::Superscript))]
    #[case("*_", None)]
    fn runs_map_to_marker_types(#[case] run: &str, #[case] expected: Option<MarkerType>) {
        assert_eq!(MarkerType::from_delimiter(run).map(|(marker, _)| marker), expected);
    }

    #[test]
    fn literal_is_the_run_itself() {
        for (run, marker) in MarkerType::DELIMITERS {
            assert_eq!(MarkerType::from_delimiter(run), Some((marker, run)));
        }
    }

    #[test]
    fn scripts() {
        assert!(MarkerType::Superscript.is_script());
        assert!(MarkerType::Subscript.is_script());
        assert!(!MarkerType::Code.is_script());
    }
}
