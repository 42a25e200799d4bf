//! Motion model
//!
//! Pose geometry, easing, durations and the move/rotate primitives shared
//! by the live runner and the replay synthesizer.

pub mod duration;
pub mod easing;
pub mod geometry;
pub mod primitive;

pub use duration::{command_duration_ms, move_duration_ms, rotate_duration_ms, MIN_DURATION_MS};
pub use easing::{clamp_fraction, ease_in_out, time_fraction};
pub use geometry::{attachment_rect, start_pose, Kinematics, Point, Pose, Rect};
pub use primitive::Motion;
