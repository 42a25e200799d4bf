//! Offline replay
//!
//! - `synth`: fixed-timestep frame list synthesis
//! - `player`: cursor, playback and scrubbing over a frame list

pub mod player;
pub mod synth;

pub use player::ReplayPlayer;
pub use synth::{build_replay_frames, step_count, Frame};
