//! Domain models
//!
//! This module contains all persisted entities read and written by the
//! dispatcher.

pub mod contest;
pub mod order;
pub mod submission;
pub mod volunteer;

pub use contest::*;
pub use order::*;
pub use submission::*;
pub use volunteer::*;
