//! Motion primitives
//!
//! A primitive is planned once from the pose at the start of a command and
//! then sampled at eased fractions. Both the live runner and the replay
//! synthesizer go through `sample` and `end_pose`, which is what keeps
//! their trajectories identical.

use super::geometry::{Kinematics, Point, Pose};
use crate::mission::{Command, CommandKind};

/// A planned move or rotation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Motion {
    /// Straight line at constant heading
    Move {
        /// Center at the start of the command
        start: Point,
        /// Center at the end of the command
        end: Point,
        /// Heading held for the whole move
        heading: f64,
    },
    /// Rotation about the fixed trace point
    Rotate {
        /// Trace point, captured before interpolation begins
        pivot: Point,
        /// Heading at the start of the command
        start_heading: f64,
        /// Signed heading change in degrees
        delta: f64,
    },
}

impl Motion {
    /// Plan a command from the current pose
    ///
    /// Returns `None` for command kinds that are skipped.
    pub fn plan(command: &Command, pose: &Pose, kin: &Kinematics) -> Option<Self> {
        match command.kind {
            CommandKind::Move => {
                let travel =
                    Point::heading_unit(pose.heading) * kin.to_render(command.magnitude);
                Some(Motion::Move {
                    start: pose.center,
                    end: pose.center + travel,
                    heading: pose.heading,
                })
            }
            CommandKind::Rotate => Some(Motion::Rotate {
                pivot: kin.trace_point(pose),
                start_heading: pose.heading,
                delta: command.magnitude,
            }),
            CommandKind::Unknown => None,
        }
    }

    /// Pose at an eased fraction in [0, 1]
    pub fn sample(&self, eased: f64, kin: &Kinematics) -> Pose {
        match *self {
            Motion::Move {
                start,
                end,
                heading,
            } => Pose {
                center: start + (end - start) * eased,
                heading,
            },
            Motion::Rotate {
                pivot,
                start_heading,
                delta,
            } => {
                let heading = start_heading + delta * eased;
                Pose {
                    center: pivot + kin.offset_vector(heading),
                    heading,
                }
            }
        }
    }

    /// Exact analytic end pose
    ///
    /// Used to snap state when a command finishes so sampling error never
    /// carries into the next command.
    pub fn end_pose(&self, kin: &Kinematics) -> Pose {
        match *self {
            Motion::Move { end, heading, .. } => Pose {
                center: end,
                heading,
            },
            Motion::Rotate {
                pivot,
                start_heading,
                delta,
            } => {
                let heading = start_heading + delta;
                Pose {
                    center: pivot + kin.offset_vector(heading),
                    heading,
                }
            }
        }
    }

    /// Check if this is a move
    pub fn is_move(&self) -> bool {
        matches!(self, Motion::Move { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    fn assert_point_close(a: Point, b: Point) {
        assert!(
            (a.x - b.x).abs() < EPS && (a.y - b.y).abs() < EPS,
            "{:?} != {:?}",
            a,
            b
        );
    }

    #[test]
    fn test_move_up_the_field() {
        let kin = Kinematics::new(1.0, 0.0);
        let pose = Pose::new(5.0, 108.0, 90.0);
        let motion = Motion::plan(&Command::move_by(50.0), &pose, &kin).unwrap();

        let end = motion.end_pose(&kin);
        assert_point_close(end.center, Point::new(5.0, 58.0));
        assert_eq!(end.heading, 90.0);

        let mid = motion.sample(0.5, &kin);
        assert_point_close(mid.center, Point::new(5.0, 83.0));
        assert_eq!(mid.heading, 90.0);
    }

    #[test]
    fn test_move_backward_and_scaled() {
        let kin = Kinematics::new(2.0, 0.0);
        let pose = Pose::new(100.0, 50.0, 0.0);
        let motion = Motion::plan(&Command::move_by(-10.0), &pose, &kin).unwrap();
        assert_point_close(motion.end_pose(&kin).center, Point::new(80.0, 50.0));
    }

    #[test]
    fn test_move_trace_point_parallel_to_path() {
        let kin = Kinematics::new(1.0, 6.1);
        let pose = Pose::new(20.0, 80.0, 0.0);
        let motion = Motion::plan(&Command::move_by(30.0), &pose, &kin).unwrap();

        for i in 0..=10 {
            let sample = motion.sample(i as f64 / 10.0, &kin);
            let trace = kin.trace_point(&sample);
            assert!((trace.y - 80.0).abs() < EPS);
            assert!((sample.center.x - trace.x - 6.1).abs() < EPS);
        }
    }

    #[test]
    fn test_rotate_in_place_without_offset() {
        let kin = Kinematics::new(1.0, 0.0);
        let pose = Pose::new(5.0, 58.0, 90.0);
        let motion = Motion::plan(&Command::rotate_by(-90.0), &pose, &kin).unwrap();

        for i in 0..=8 {
            let sample = motion.sample(i as f64 / 8.0, &kin);
            assert_point_close(sample.center, pose.center);
        }
        let end = motion.end_pose(&kin);
        assert_eq!(end.heading, 0.0);
        assert_point_close(end.center, pose.center);
    }

    #[test]
    fn test_rotate_swings_center_about_trace_point() {
        let kin = Kinematics::new(1.0, 6.1);
        let pose = Pose::new(50.0, 50.0, 90.0);
        let pivot = kin.trace_point(&pose);
        let motion = Motion::plan(&Command::rotate_by(-90.0), &pose, &kin).unwrap();

        // Quarter arc of radius 6.1 about the fixed pivot
        for i in 0..=16 {
            let sample = motion.sample(i as f64 / 16.0, &kin);
            assert!((sample.center.distance_to(pivot) - 6.1).abs() < EPS);
            assert_point_close(kin.trace_point(&sample), pivot);
        }

        // Final center sits `offset` along the new heading (0 = right)
        let end = motion.end_pose(&kin);
        assert_eq!(end.heading, 0.0);
        assert_point_close(end.center, pivot + Point::new(6.1, 0.0));
    }

    #[test]
    fn test_unknown_command_not_planned() {
        let kin = Kinematics::new(1.0, 0.0);
        let command = Command {
            kind: CommandKind::Unknown,
            magnitude: 10.0,
        };
        assert!(Motion::plan(&command, &Pose::default(), &kin).is_none());
    }

    proptest! {
        #[test]
        fn prop_zero_offset_rotation_keeps_center(
            x in -500.0f64..500.0,
            y in -500.0f64..500.0,
            heading in -720.0f64..720.0,
            delta in -720.0f64..720.0,
            p in 0.0f64..=1.0,
        ) {
            let kin = Kinematics::new(1.0, 0.0);
            let pose = Pose::new(x, y, heading);
            let motion = Motion::plan(&Command::rotate_by(delta), &pose, &kin).unwrap();
            let sample = motion.sample(p, &kin);
            prop_assert_eq!(sample.center, pose.center);
        }

        #[test]
        fn prop_sample_at_one_matches_end_pose(
            heading in 0.0f64..360.0,
            magnitude in -200.0f64..200.0,
            offset in -20.0f64..20.0,
            rotate in any::<bool>(),
        ) {
            let kin = Kinematics::new(1.5, offset);
            let pose = Pose::new(100.0, 60.0, heading);
            let command = if rotate {
                Command::rotate_by(magnitude)
            } else {
                Command::move_by(magnitude)
            };
            let motion = Motion::plan(&command, &pose, &kin).unwrap();
            let sampled = motion.sample(1.0, &kin);
            let end = motion.end_pose(&kin);
            prop_assert!((sampled.center.x - end.center.x).abs() < 1e-9);
            prop_assert!((sampled.center.y - end.center.y).abs() < 1e-9);
            prop_assert!((sampled.heading - end.heading).abs() < 1e-9);
        }

        #[test]
        fn prop_trace_point_invariant_holds(
            heading in 0.0f64..360.0,
            delta in -360.0f64..360.0,
            offset in -20.0f64..20.0,
            p in 0.0f64..=1.0,
        ) {
            let kin = Kinematics::new(1.0, offset);
            let pose = Pose::new(80.0, 40.0, heading);
            let motion = Motion::plan(&Command::rotate_by(delta), &pose, &kin).unwrap();
            let sample = motion.sample(p, &kin);
            let trace = kin.trace_point(&sample);
            let pivot = kin.trace_point(&pose);
            prop_assert!((trace.x - pivot.x).abs() < 1e-9);
            prop_assert!((trace.y - pivot.y).abs() < 1e-9);
        }
    }
}
