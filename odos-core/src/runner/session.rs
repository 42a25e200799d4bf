//! Per-run session state
//!
//! A session owns the pose, the command queue and the cancellation flag
//! of exactly one live run. Starting a new run builds a new session; the
//! previous one is discarded, never merged.

use alloc::collections::VecDeque;

use crate::config::{FieldGeometry, SimConfig};
use crate::mission::{Command, CommandKind, Mission};
use crate::motion::{
    command_duration_ms, ease_in_out, start_pose, time_fraction, Kinematics, Motion, Point, Pose,
};

/// Command currently animating
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActiveMotion {
    /// Planned primitive
    pub motion: Motion,
    /// Frame time the command began at (ms)
    pub started_ms: f64,
    /// Command duration (ms)
    pub duration_ms: f64,
}

/// Result of advancing the active command to a frame time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    /// Still interpolating
    Animating {
        /// Sampled pose
        pose: Pose,
        /// Trace point to emit, if the command traces continuously
        trace: Option<Point>,
    },
    /// Reached full progress; state has been snapped to the end pose
    Finished {
        /// Pose sampled at full progress
        pose: Pose,
        /// Trace point to emit, if the command traces continuously
        trace: Option<Point>,
        /// Settled trace point of a finished rotation
        settled: Option<Point>,
    },
    /// Nothing is animating
    Idle,
}

/// State of one live run
#[derive(Debug, Clone)]
pub struct RunnerSession {
    kinematics: Kinematics,
    pose: Pose,
    queue: VecDeque<Command>,
    active: Option<ActiveMotion>,
    cancelled: bool,
}

impl RunnerSession {
    /// Create a session at the mission's start pose with its full queue
    pub fn new(mission: &Mission, field: &FieldGeometry) -> Self {
        let queue = mission.commands.iter().copied().collect();

        Self {
            kinematics: Kinematics::for_mission(mission, field),
            pose: start_pose(mission, field),
            queue,
            active: None,
            cancelled: false,
        }
    }

    /// Current pose
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// Trace point of the current pose
    pub fn trace_point(&self) -> Point {
        self.kinematics.trace_point(&self.pose)
    }

    /// Scale and pivot data of this run
    pub fn kinematics(&self) -> &Kinematics {
        &self.kinematics
    }

    /// Command currently animating
    pub fn active(&self) -> Option<&ActiveMotion> {
        self.active.as_ref()
    }

    /// Commands not yet started
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Raise the cancellation flag
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.active = None;
    }

    /// Check the cancellation flag
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Dequeue and plan the next executable command
    ///
    /// Unknown commands are skipped with a warning. Returns `false` when the
    /// queue is empty.
    pub fn begin_next(&mut self, now_ms: f64, config: &SimConfig) -> bool {
        while let Some(command) = self.queue.pop_front() {
            let planned = Motion::plan(&command, &self.pose, &self.kinematics)
                .zip(command_duration_ms(&command, config));

            match planned {
                Some((motion, duration_ms)) => {
                    debug!(
                        "command begins: {} ms, {} left in queue",
                        duration_ms,
                        self.queue.len()
                    );
                    self.active = Some(ActiveMotion {
                        motion,
                        started_ms: now_ms,
                        duration_ms,
                    });
                    return true;
                }
                None => {
                    debug_assert_eq!(command.kind, CommandKind::Unknown);
                    warn!(
                        "skipping command of unknown kind (magnitude {})",
                        command.magnitude
                    );
                }
            }
        }

        self.active = None;
        false
    }

    /// Advance the active command to a frame time
    pub fn advance(&mut self, now_ms: f64, trace_enabled: bool) -> FrameStep {
        if self.cancelled {
            return FrameStep::Idle;
        }
        let Some(active) = self.active else {
            return FrameStep::Idle;
        };

        let raw = time_fraction(now_ms - active.started_ms, active.duration_ms);
        let pose = active.motion.sample(ease_in_out(raw), &self.kinematics);
        self.pose = pose;

        let trace = if trace_enabled && active.motion.is_move() {
            Some(self.kinematics.trace_point(&pose))
        } else {
            None
        };

        if raw < 1.0 {
            return FrameStep::Animating { pose, trace };
        }

        self.pose = active.motion.end_pose(&self.kinematics);
        self.active = None;

        let settled = if trace_enabled && !active.motion.is_move() {
            Some(self.trace_point())
        } else {
            None
        };

        FrameStep::Finished {
            pose,
            trace,
            settled,
        }
    }
}
