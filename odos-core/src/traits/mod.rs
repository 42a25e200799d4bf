//! Collaborator traits
//!
//! These traits define the interface between the engine and the host
//! that owns timing and drawing.

pub mod renderer;
pub mod scheduler;

pub use renderer::{RecordingRenderer, Renderer};
pub use scheduler::{FrameScheduler, FrameToken, ManualScheduler};
