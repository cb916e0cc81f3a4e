//! Utility functions

pub mod crypto;

pub use crypto::{random_letters, sha512_hex};
