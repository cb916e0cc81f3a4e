//! Contest model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Contest database model
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contest {
    pub id: Uuid,
    /// Contest identifier on the judging system
    pub external_id: i64,
    /// Raw judging system code, see [`TestSystem`]
    pub test_system: i32,
    #[serde(skip_serializing)]
    pub api_key: String,
    #[serde(skip_serializing)]
    pub api_secret: String,
    /// `problemIndex=color` per line
    pub colors_layout: String,
    /// `login:room:place:displayName` per line
    pub teams_layout: String,
    /// Volunteer who receives orders that cannot be routed to a room
    pub admin_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Contest {
    /// Resolve the configured judging system.
    ///
    /// An unknown code is a configuration error scoped to this contest.
    pub fn judge(&self) -> AppResult<TestSystem> {
        TestSystem::from_code(self.test_system).ok_or_else(|| {
            AppError::Configuration(format!(
                "contest {} has unsupported judging system code {}",
                self.id, self.test_system
            ))
        })
    }

    /// Human readable label, e.g. `Codeforces 1234`
    pub fn label(&self) -> String {
        match TestSystem::from_code(self.test_system) {
            Some(system) => format!("{} {}", system, self.external_id),
            None => format!("unknown({}) {}", self.test_system, self.external_id),
        }
    }
}

/// Judging systems the dispatcher can poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestSystem {
    YandexContest,
    Codeforces,
}

impl TestSystem {
    /// Stored integer code
    pub fn code(&self) -> i32 {
        match self {
            Self::YandexContest => 1,
            Self::Codeforces => 2,
        }
    }

    /// Parse stored integer code
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::YandexContest),
            2 => Some(Self::Codeforces),
            _ => None,
        }
    }
}

impl std::fmt::Display for TestSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::YandexContest => write!(f, "Yandex.Contest"),
            Self::Codeforces => write!(f, "Codeforces"),
        }
    }
}

/// Fields supplied when registering a contest
#[derive(Debug, Clone, Deserialize)]
pub struct NewContest {
    pub external_id: i64,
    pub test_system: TestSystem,
    pub api_key: String,
    #[serde(default)]
    pub api_secret: String,
    pub colors_layout: String,
    pub teams_layout: String,
    pub admin_id: Uuid,
}
