//! Volunteer model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user who delivers balloons inside one or more rooms
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Volunteer {
    pub id: Uuid,
    pub username: String,
    /// One room code per line
    pub rooms_layout: String,
    pub created_at: DateTime<Utc>,
}

impl Volunteer {
    /// Room codes this volunteer services, in layout order
    pub fn rooms(&self) -> impl Iterator<Item = &str> {
        self.rooms_layout.lines().map(|line| line.trim_end_matches('\r'))
    }

    /// Whole-line match against the room list
    pub fn services_room(&self, room: &str) -> bool {
        self.rooms().any(|r| r == room)
    }
}

/// Volunteer together with the number of orders still waiting on them
#[derive(Debug, Clone, FromRow)]
pub struct VolunteerLoad {
    #[sqlx(flatten)]
    pub volunteer: Volunteer,
    pub open_orders: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volunteer(rooms: &str) -> Volunteer {
        Volunteer {
            id: Uuid::new_v4(),
            username: "vera".to_string(),
            rooms_layout: rooms.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_room_match_is_whole_line() {
        let v = volunteer("Room1\r\nHall_B\nR");
        assert!(v.services_room("Room1"));
        assert!(v.services_room("Hall_B"));
        assert!(v.services_room("R"));
        assert!(!v.services_room("Room"));
        assert!(!v.services_room("Room12"));
        assert!(!v.services_room("Hall"));
    }

    #[test]
    fn test_empty_room_list() {
        let v = volunteer("");
        assert_eq!(v.rooms().count(), 0);
        assert!(!v.services_room(""));
    }
}
