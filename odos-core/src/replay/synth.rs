//! Replay frame synthesis
//!
//! Walks a mission with a fixed timestep instead of wall-clock frames. It
//! goes through the same planning, easing and sampling as the live runner,
//! so the two trajectories agree at every shared fraction.

use alloc::vec::Vec;

use libm::ceil;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{FieldGeometry, SimConfig};
use crate::mission::Mission;
use crate::motion::{command_duration_ms, ease_in_out, start_pose, Kinematics, Motion, Pose};

/// One replay sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Frame {
    /// Time since the start of the replay (ms)
    pub t_ms: f64,
    /// Body center X (rendering units)
    pub x: f64,
    /// Body center Y (rendering units, Y down)
    pub y: f64,
    /// Heading in degrees
    pub heading: f64,
}

impl Frame {
    pub fn from_pose(t_ms: f64, pose: &Pose) -> Self {
        Self {
            t_ms,
            x: pose.center.x,
            y: pose.center.y,
            heading: pose.heading,
        }
    }

    pub fn pose(&self) -> Pose {
        Pose::new(self.x, self.y, self.heading)
    }
}

/// Number of fixed steps a command of `duration_ms` spans
pub fn step_count(duration_ms: f64, dt_ms: f64) -> usize {
    let steps = ceil(duration_ms / dt_ms);
    if steps.is_finite() && steps > 1.0 {
        steps as usize
    } else {
        1
    }
}

/// Build the replay frame list of a mission
///
/// Frame 0 is the start pose at `t = 0`. Each command contributes
/// `max(1, ceil(duration / dt))` frames spaced `dt = 1000 / fps` apart,
/// after which the pose snaps to the command's exact end.
pub fn build_replay_frames(mission: &Mission, config: &SimConfig, field: &FieldGeometry) -> Vec<Frame> {
    let config = config.sanitized();
    let dt_ms = 1000.0 / config.replay_fps;
    let kinematics = Kinematics::for_mission(mission, field);

    let mut pose = start_pose(mission, field);
    let mut t_ms = 0.0;
    let mut frames = Vec::new();
    frames.push(Frame::from_pose(t_ms, &pose));

    for command in mission.commands.iter() {
        let planned = Motion::plan(command, &pose, &kinematics)
            .zip(command_duration_ms(command, &config));
        let Some((motion, duration_ms)) = planned else {
            warn!(
                "replay skipping command of unknown kind (magnitude {})",
                command.magnitude
            );
            continue;
        };

        let steps = step_count(duration_ms, dt_ms);
        frames.reserve(steps);
        for k in 1..=steps {
            let sampled = motion.sample(ease_in_out(k as f64 / steps as f64), &kinematics);
            t_ms += dt_ms;
            frames.push(Frame::from_pose(t_ms, &sampled));
        }

        pose = motion.end_pose(&kinematics);
    }

    debug!(
        "replay built: {} frames over {} ms at {} fps",
        frames.len(),
        t_ms,
        config.replay_fps
    );
    frames
}
