//! Order model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Balloon delivery order, one per accepted (author, problem) pair
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub submission_id: Uuid,
    /// Empty when the problem has no color layout entry
    pub balloon_color: String,
    /// Empty when the author has no team layout entry
    pub room: String,
    pub place: String,
    pub author_name: String,
    pub volunteer_id: Uuid,
    pub done: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields of an order about to be created
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewOrder {
    pub submission_id: Uuid,
    pub balloon_color: String,
    pub room: String,
    pub place: String,
    pub author_name: String,
    pub volunteer_id: Uuid,
}

/// Orders grouped by seat, as shown on the delivery board
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeatSummary {
    pub room: String,
    pub place: String,
    pub author_name: String,
    pub delivered: Vec<String>,
    pub pending: Vec<String>,
}
