//! Ordered, case-insensitive header storage.
//!
//! # Design Decisions
//! - Names keep the case they were added with; lookups ignore ASCII case
//! - Insertion order is the emission order
//! - Repeated names are separate lines (Set-Cookie and friends)

use std::fmt;

/// A single header line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    name: String,
    value: String,
}

impl HeaderLine {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if this line carries the given name (case-insensitive).
    pub fn name_matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl fmt::Display for HeaderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Multimap of header lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMultimap {
    lines: Vec<HeaderLine>,
}

impl HeaderMultimap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Append a line, keeping any existing lines with the same name.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.lines.push(HeaderLine::new(name, value));
    }

    /// First value stored under `name`.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.name_matches(name))
            .map(HeaderLine::value)
    }

    /// Every value stored under `name`, in insertion order.
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.lines
            .iter()
            .filter(|line| line.name_matches(name))
            .map(HeaderLine::value)
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lines.iter().any(|line| line.name_matches(name))
    }

    /// Remove every line stored under `name`. Returns how many were removed.
    pub fn remove(&mut self, name: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|line| !line.name_matches(name));
        before - self.lines.len()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &HeaderLine> {
        self.lines.iter()
    }
}

impl<'a> IntoIterator for &'a HeaderMultimap {
    type Item = &'a HeaderLine;
    type IntoIter = std::slice::Iter<'a, HeaderLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
