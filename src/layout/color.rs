//! Color layout: `problemIndex=color`

use std::sync::LazyLock;

use regex::Regex;

use super::{content_lines, LayoutError, LayoutKind};

static COLOR_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w+)=([\w#]+)$").expect("color layout pattern is valid")
});

/// One `problemIndex=color` record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    pub problem_index: String,
    pub color: String,
}

/// Parsed color layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorLayout {
    entries: Vec<ColorEntry>,
}

impl ColorLayout {
    /// Parse the whole layout, failing on the first malformed line
    pub fn parse(text: &str) -> Result<Self, LayoutError> {
        let entries = content_lines(text)
            .map(|(line_number, line)| Self::parse_line(line_number, line))
            .collect::<Result<Vec<_>, LayoutError>>()?;

        Ok(Self { entries })
    }

    /// Parse every well-formed line, returning the malformed ones separately
    pub fn parse_lenient(text: &str) -> (Self, Vec<LayoutError>) {
        let mut entries = Vec::new();
        let mut skipped = Vec::new();
        for (line_number, line) in content_lines(text) {
            match Self::parse_line(line_number, line) {
                Ok(entry) => entries.push(entry),
                Err(err) => skipped.push(err),
            }
        }

        (Self { entries }, skipped)
    }

    fn parse_line(line_number: usize, line: &str) -> Result<ColorEntry, LayoutError> {
        let caps = COLOR_LINE.captures(line).ok_or_else(|| LayoutError {
            kind: LayoutKind::Color,
            line_number,
            line: line.to_string(),
        })?;
        Ok(ColorEntry {
            problem_index: caps[1].to_string(),
            color: caps[2].to_string(),
        })
    }

    /// Check the layout without keeping the parsed records
    pub fn validate(text: &str) -> Result<(), LayoutError> {
        Self::parse(text).map(|_| ())
    }

    /// Color of the first record for `problem_index`
    pub fn color_for(&self, problem_index: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.problem_index == problem_index)
            .map(|entry| entry.color.as_str())
    }

    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_match_wins() {
        let layout = ColorLayout::parse("A=red\nB=#00ff00\nA=blue").unwrap();
        assert_eq!(layout.color_for("A"), Some("red"));
        assert_eq!(layout.color_for("B"), Some("#00ff00"));
        assert_eq!(layout.color_for("C"), None);
    }

    #[test]
    fn test_index_must_match_exactly() {
        let layout = ColorLayout::parse("A1=red\nA=blue").unwrap();
        assert_eq!(layout.color_for("A"), Some("blue"));
        assert_eq!(layout.color_for("A1"), Some("red"));
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let layout = ColorLayout::parse("A=red\r\n\r\nB=green\r\n").unwrap();
        assert_eq!(layout.entries().len(), 2);
        assert_eq!(layout.color_for("B"), Some("green"));
    }

    #[test]
    fn test_malformed_line_is_reported() {
        let err = ColorLayout::parse("A=red\nB = green").unwrap_err();
        assert_eq!(err.kind, LayoutKind::Color);
        assert_eq!(err.line_number, 2);
        assert_eq!(err.line, "B = green");
        assert!(err.to_string().contains("ProblemIndex=Color"));

        assert!(ColorLayout::validate("A=light blue").is_err());
        assert!(ColorLayout::validate("=red").is_err());
        assert!(ColorLayout::validate("A=").is_err());
    }

    #[test]
    fn test_lenient_parse_keeps_valid_lines() {
        let (layout, skipped) = ColorLayout::parse_lenient("A=red\nB = blue\n\nC=green");
        assert_eq!(layout.color_for("A"), Some("red"));
        assert_eq!(layout.color_for("B"), None);
        assert_eq!(layout.color_for("C"), Some("green"));
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].line_number, 2);
    }
}
