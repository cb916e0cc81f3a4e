//! Business logic services

pub mod assignment_service;
pub mod contest_service;
pub mod order_service;
pub mod processing_service;
pub mod sync_service;

pub use assignment_service::{OrderAssignmentService, RoomLocks};
pub use contest_service::ContestService;
pub use order_service::OrderService;
pub use processing_service::{ContestProcessor, ProcessStats};
pub use sync_service::{SubmissionSyncService, SyncStats};
