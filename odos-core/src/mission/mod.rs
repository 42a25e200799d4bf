//! Mission model
//!
//! Validated run descriptions and the normalization step that builds them.

pub mod document;
pub mod types;

pub use document::{ActionDocument, AttachmentDocument, MissionDocument};
pub use types::*;
