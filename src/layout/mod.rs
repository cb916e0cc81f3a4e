//! Layout description languages
//!
//! Contests carry two small line-oriented configuration texts:
//!
//! - the color layout, one `problemIndex=color` pair per line
//! - the team layout, one `login:room:place:displayName` record per line
//!
//! Both are validated when a contest is saved and parsed into structured
//! records before lookups, so a lookup never re-scans raw text. Blank lines
//! are ignored; the first matching record wins.

pub mod color;
pub mod team;

pub use color::{ColorEntry, ColorLayout};
pub use team::{TeamEntry, TeamLayout};

/// Which layout a validation error belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutKind {
    Color,
    Team,
}

impl LayoutKind {
    /// Expected line grammar, shown to whoever edits the layout
    pub fn expected_format(&self) -> &'static str {
        match self {
            Self::Color => "ProblemIndex=Color",
            Self::Team => "TeamLogin:Room:Place:TeamName",
        }
    }
}

impl std::fmt::Display for LayoutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Color => write!(f, "color layout"),
            Self::Team => write!(f, "team layout"),
        }
    }
}

/// A layout line that does not follow its grammar
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} line {line_number} \"{line}\" does not match format \"{}\"", .kind.expected_format())]
pub struct LayoutError {
    pub kind: LayoutKind,
    /// 1-based
    pub line_number: usize,
    pub line: String,
}

/// Iterate non-blank lines with their 1-based numbers
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .map(|line| line.trim_end_matches('\r'))
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line))
}
