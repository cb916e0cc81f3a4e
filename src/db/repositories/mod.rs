//! Database repositories
//!
//! Repositories handle all direct database interactions.

pub mod contest_repo;
pub mod order_repo;
pub mod submission_repo;
pub mod volunteer_repo;

pub use contest_repo::ContestRepository;
pub use order_repo::OrderRepository;
pub use submission_repo::SubmissionRepository;
pub use volunteer_repo::VolunteerRepository;
