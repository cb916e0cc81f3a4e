//! Balloon Dispatch - Contest Balloon Delivery Engine
//!
//! This library polls external judging systems for contest submissions and
//! turns every accepted (author, problem) pair into a balloon delivery order
//! assigned to a volunteer working in the author's room.
//!
//! # Pipeline
//!
//! - **Clients**: authenticated, retrying access to Yandex.Contest and Codeforces
//! - **Sync**: deduplicating upsert of remote submissions into the local cache
//! - **Assignment**: layout lookup and least-loaded volunteer selection
//! - **Scheduler**: periodic processing of every configured contest
//!
//! Persistence sits behind the [`db::Store`] trait, with PostgreSQL and
//! in-memory implementations.

pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod layout;
pub mod models;
pub mod scheduler;
pub mod services;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult};
pub use state::AppState;
