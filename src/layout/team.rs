//! Team layout: `login:room:place:displayName`

use std::sync::LazyLock;

use regex::Regex;

use super::{content_lines, LayoutError, LayoutKind};

// Display names may contain anything, including ':'.
static TEAM_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([\w=]+):(\w+):(\w+):(.+)$").expect("team layout pattern is valid")
});

/// One team seat record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamEntry {
    pub login: String,
    pub room: String,
    pub place: String,
    pub display_name: String,
}

/// Parsed team layout
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamLayout {
    entries: Vec<TeamEntry>,
}

impl TeamLayout {
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

    fn parse_line(line_number: usize, line: &str) -> Result<TeamEntry, LayoutError> {
        let caps = TEAM_LINE.captures(line).ok_or_else(|| LayoutError {
            kind: LayoutKind::Team,
            line_number,
            line: line.to_string(),
        })?;
        Ok(TeamEntry {
            login: caps[1].to_string(),
            room: caps[2].to_string(),
            place: caps[3].to_string(),
            display_name: caps[4].to_string(),
        })
    }

    /// Check the layout without keeping the parsed records
    pub fn validate(text: &str) -> Result<(), LayoutError> {
        Self::parse(text).map(|_| ())
    }

    /// Seat of the first record whose login equals `author`
    pub fn seat_for(&self, author: &str) -> Option<&TeamEntry> {
        self.entries.iter().find(|entry| entry.login == author)
    }

    pub fn entries(&self) -> &[TeamEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_first_match() {
        let layout = TeamLayout::parse(
            "alice:Room1:5:Alice Corp\nbob:Hall:12:Bobcats\nalice:Room2:1:Duplicate",
        )
        .unwrap();

        let seat = layout.seat_for("alice").unwrap();
        assert_eq!(seat.room, "Room1");
        assert_eq!(seat.place, "5");
        assert_eq!(seat.display_name, "Alice Corp");
        assert!(layout.seat_for("carol").is_none());
    }

    #[test]
    fn test_display_name_may_contain_colons() {
        let layout = TeamLayout::parse("team_7:R:3:MSU: Team 7 (a:b)").unwrap();
        let seat = layout.seat_for("team_7").unwrap();
        assert_eq!(seat.room, "R");
        assert_eq!(seat.display_name, "MSU: Team 7 (a:b)");
    }

    #[test]
    fn test_login_may_contain_equals_sign() {
        let layout = TeamLayout::parse("a=b:R:1:Name").unwrap();
        assert!(layout.seat_for("a=b").is_some());
    }

    #[test]
    fn test_login_is_not_a_prefix_match() {
        let layout = TeamLayout::parse("alice2:R:1:Other").unwrap();
        assert!(layout.seat_for("alice").is_none());
    }

    #[test]
    fn test_malformed_line_is_reported() {
        let err = TeamLayout::parse("alice:Room1:5:Alice\nbob:Hall B:1:Bob").unwrap_err();
        assert_eq!(err.kind, LayoutKind::Team);
        assert_eq!(err.line_number, 2);
        assert!(err.to_string().contains("TeamLogin:Room:Place:TeamName"));

        assert!(TeamLayout::validate("alice:Room1:5:").is_err());
        assert!(TeamLayout::validate("alice:Room1").is_err());
    }

    #[test]
    fn test_lenient_parse_keeps_valid_lines() {
        let (layout, skipped) =
            TeamLayout::parse_lenient("bob:Hall B:1:Bob\nalice:Room1:5:Alice Corp");
        assert_eq!(layout.seat_for("alice").map(|s| s.room.as_str()), Some("Room1"));
        assert!(layout.seat_for("bob").is_none());
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].kind, LayoutKind::Team);
        assert_eq!(skipped[0].line, "bob:Hall B:1:Bob");
    }
}
