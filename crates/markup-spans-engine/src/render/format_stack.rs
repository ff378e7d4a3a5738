//! Formats open at the current point of a span-building pass.

use crate::style::{FormatKind, StyleResolver, TextStyle};

/// An open format: the token indices that open and close it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatEntry {
    pub open: usize,
    pub close: usize,
    pub format: FormatKind,
}

#[derive(Debug, Clone, Default)]
pub struct FormatStack {
    entries: Vec<FormatEntry>,
}

impl FormatStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: FormatEntry) {
        self.entries.push(entry);
    }

    /// Removes the entry opened at token `open`, wherever it sits.
    pub fn remove(&mut self, open: usize) -> Option<FormatEntry> {
        let index = self.entries.iter().rposition(|entry| entry.open == open)?;
        Some(self.entries.remove(index))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &FormatEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn has_script(&self) -> bool {
        self.entries.iter().any(|entry| entry.format.is_script())
    }

    /// Folds the resolver over the stack, innermost applied last.
    pub fn resolve<R: StyleResolver + ?Sized>(&self, base: &TextStyle, resolver: &R) -> TextStyle {
        self.entries
            .iter()
            .fold(*base, |style, entry| resolver.resolve(entry.format, &style))
    }
}
