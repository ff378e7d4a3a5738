//! The fixed marker alphabet and the defaults shared by every crate.
//!
//! All marker characters are ASCII, so any offset the tokenizer produces
//! sits on a `char` boundary of the input.

/// Characters that can start or take part in a marker, link or placeholder.
///
/// Text containing none of these parses to a single text token.
pub const MARKER_ALPHABET: &[u8] = b"*_~+=`^[]{}\\";

/// Characters a backslash may escape: the alphabet plus link parentheses.
pub const ESCAPABLE: &[u8] = b"*_~+=`^[](){}\\";

pub const ESCAPE: u8 = b'\\';

/// Maximum nesting level of valid pairs (an outermost pair is level 1).
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 2;

/// Maximum number of parse results kept by a cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 200;

/// Inputs longer than this many bytes are never cached.
pub const DEFAULT_MAX_CACHE_KEY_LENGTH: usize = 2000;

/// Returns true if `text` contains any marker alphabet character.
///
/// Callers on a render-hot path can use this to skip parsing entirely.
#[must_use]
pub fn has_markup(text: &str) -> bool {
    text.bytes().any(|b| MARKER_ALPHABET.contains(&b))
}

#[must_use]
pub fn is_escapable(b: u8) -> bool {
    ESCAPABLE.contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_has_no_markup() {
        assert!(!has_markup("hello world, (with parens) and 100% plain."));
        assert!(!has_markup(""));
    }

    #[test]
    fn every_alphabet_char_counts_as_markup() {
        for &b in MARKER_ALPHABET {
            let s = format!("a{}b", b as char);
            assert!(has_markup(&s), "{s:?} should contain markup");
        }
    }

    #[test]
    fn parens_are_escapable_but_not_markup() {
        assert!(!has_markup("(x)"));
        assert!(is_escapable(b'('));
        assert!(is_escapable(b')'));
        assert!(!is_escapable(b'a'));
    }
}
