//! Submission model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::constants::VERDICT_OK;

/// Cached copy of a judge submission
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: Uuid,
    pub contest_id: Uuid,
    /// Submission identifier on the judging system, unique per contest
    pub external_id: i64,
    pub problem_index: String,
    /// Handle or team name as reported by the judge
    pub author: String,
    /// Seconds since contest start
    pub time_from_start: i64,
    pub verdict: Verdict,
}

/// Field values written on every sync, keyed by `(contest_id, external_id)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionUpsert {
    pub contest_id: Uuid,
    pub external_id: i64,
    pub problem_index: String,
    pub author: String,
    pub time_from_start: i64,
    pub verdict: Verdict,
}

/// Normalized submission verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[repr(i32)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Testing = 1,
    Ok = 2,
    Other = 3,
}

impl Verdict {
    /// Map a judge verdict string.
    ///
    /// Exactly `"OK"` is accepted, an empty string means the judge has not
    /// decided yet, anything else is some rejection.
    pub fn from_judge(raw: &str) -> Self {
        match raw {
            "" => Self::Testing,
            VERDICT_OK => Self::Ok,
            _ => Self::Other,
        }
    }

    /// Check if this verdict means the solution was accepted
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Ok)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Testing => write!(f, "TESTING"),
            Self::Ok => write!(f, "OK"),
            Self::Other => write!(f, "OTHER"),
        }
    }
}
