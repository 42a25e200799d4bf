//! Configuration types
//!
//! Motion speeds, replay sampling and field geometry.

pub mod types;

pub use types::*;
