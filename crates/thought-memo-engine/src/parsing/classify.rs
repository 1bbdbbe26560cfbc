use super::marker::{Marker, extract_marker};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    /// Zero-based line index in the document.
    pub index: usize,
    /// The raw line, marker included.
    pub text: &'a str,
    /// Whether the line is blank (whitespace only).
    pub is_blank: bool,
    /// Well-formed marker carried by the line.
    pub marker: Option<Marker<'a>>,
    /// Whether the trimmed line starts with `--`.
    pub is_excluded: bool,
}

/// Classifies individual lines for the block parsing phase.
pub struct LineClassifier;

impl LineClassifier {
    /// Classifies a line into a [`LineClass`].
    pub fn classify<'a>(&self, index: usize, text: &'a str) -> LineClass<'a> {
        let is_blank = text.trim().is_empty();
        LineClass {
            index,
            text,
            is_blank,
            marker: if is_blank { None } else { extract_marker(text) },
            is_excluded: is_excluded_line(text),
        }
    }
}

/// Lines whose trimmed text starts with `--` are outside block management.
pub fn is_excluded_line(line: &str) -> bool {
    line.trim().starts_with("--")
}
