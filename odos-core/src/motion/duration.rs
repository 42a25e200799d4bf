//! Duration model
//!
//! Converts a command's magnitude into wall-clock time under the
//! configured constant speeds. Every duration is at least 1 ms, so a
//! zero-magnitude command still runs instead of being skipped.

use libm::fabs;

use crate::config::{SimConfig, MIN_ANGULAR_SPEED, MIN_LINEAR_SPEED};
use crate::mission::{Command, CommandKind};

/// Shortest duration any command can take
pub const MIN_DURATION_MS: f64 = 1.0;

/// Duration of a move, in milliseconds
pub fn move_duration_ms(distance: f64, linear_speed: f64) -> f64 {
    let speed = linear_speed.max(MIN_LINEAR_SPEED);
    (fabs(distance) / speed * 1000.0).max(MIN_DURATION_MS)
}

/// Duration of a rotation, in milliseconds
pub fn rotate_duration_ms(angle_deg: f64, angular_speed: f64) -> f64 {
    let speed = angular_speed.max(MIN_ANGULAR_SPEED);
    (fabs(angle_deg) / speed * 1000.0).max(MIN_DURATION_MS)
}

/// Duration of a command, or `None` for kinds the runners skip
pub fn command_duration_ms(command: &Command, config: &SimConfig) -> Option<f64> {
    match command.kind {
        CommandKind::Move => Some(move_duration_ms(command.magnitude, config.linear_speed)),
        CommandKind::Rotate => Some(rotate_duration_ms(command.magnitude, config.angular_speed)),
        CommandKind::Unknown => None,
    }
}
