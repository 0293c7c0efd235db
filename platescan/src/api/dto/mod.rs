//! Wire types for the HTTP API that are not domain models themselves.
//!
//! Plate records travel as [`crate::models::PlateRecord`] unchanged; the
//! types here cover requests, confirmations and extraction results.

pub mod extraction;
pub mod plates;

pub use extraction::*;
pub use plates::*;
