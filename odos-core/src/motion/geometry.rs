//! Pose geometry
//!
//! Rendering space has X to the right and Y growing downward. Headings are
//! in degrees with 0 pointing right and 90 pointing up the field, so a
//! heading maps to the direction `(cos h, -sin h)`.

use core::f64::consts::PI;
use core::ops::{Add, Mul, Sub};

use libm::{cos, fabs, sin};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::FieldGeometry;
use crate::mission::{normalize_degrees, Attachment, AttachmentSide, BodyDimensions, Mission};

/// Point or vector in rendering units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit direction for a heading in degrees
    pub fn heading_unit(heading_deg: f64) -> Self {
        let r = heading_deg * PI / 180.0;
        Self::new(cos(r), -sin(r))
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: Point) -> f64 {
        libm::hypot(self.x - other.x, self.y - other.y)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Body pose in rendering units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// Geometric center of the body
    pub center: Point,
    /// Heading in degrees; accumulates freely during a run
    pub heading: f64,
}

impl Pose {
    pub const fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            center: Point::new(x, y),
            heading,
        }
    }
}

/// Scale and pivot data shared by every primitive of a run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Kinematics {
    /// Rendering units per physical unit
    pub scale: f64,
    /// Signed trace-point to center distance (physical units)
    pub pivot_offset: f64,
}

impl Kinematics {
    pub const fn new(scale: f64, pivot_offset: f64) -> Self {
        Self {
            scale,
            pivot_offset,
        }
    }

    /// Kinematics for a mission placed on a field
    pub fn for_mission(mission: &Mission, field: &FieldGeometry) -> Self {
        Self::new(field.scale(), mission.pivot_offset)
    }

    /// Vector from the trace point to the body center at a heading
    pub fn offset_vector(&self, heading_deg: f64) -> Point {
        Point::heading_unit(heading_deg) * (self.pivot_offset * self.scale)
    }

    /// Trace point of a pose
    ///
    /// Invariant: `trace_point(p) == p.center - offset_vector(p.heading)`.
    pub fn trace_point(&self, pose: &Pose) -> Point {
        pose.center - self.offset_vector(pose.heading)
    }

    /// Convert a physical distance to rendering units
    pub fn to_render(&self, physical: f64) -> f64 {
        physical * self.scale
    }
}

/// Compute the start pose of a mission
///
/// `(start_x, start_y)` is the bottom-left corner of the rotated body's
/// axis-aligned bounding box in the Y-up field frame. The center is offset
/// from it by the box half-extents and then flipped into the Y-down
/// rendering frame.
pub fn start_pose(mission: &Mission, field: &FieldGeometry) -> Pose {
    let scale = field.scale();
    let heading = normalize_degrees(mission.start_angle);
    let r = heading * PI / 180.0;
    let c = fabs(cos(r));
    let s = fabs(sin(r));

    let half_length = mission.body.length.max(0.0) * scale / 2.0;
    let half_width = mission.body.width.max(0.0) * scale / 2.0;

    let dx = c * half_length + s * half_width;
    let dy = s * half_length + c * half_width;

    Pose::new(
        mission.start_x * scale + dx,
        field.render_height - mission.start_y * scale - dy,
        heading,
    )
}

/// Axis-aligned rectangle in body-local rendering units
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Body-local rectangle of a side attachment
///
/// The body frame is centered on the body with its front toward -y.
/// Returns `None` for attachments with no area.
pub fn attachment_rect(attachment: &Attachment, body: &BodyDimensions, scale: f64) -> Option<Rect> {
    if attachment.width <= 0.0 || attachment.length <= 0.0 {
        return None;
    }

    let width = attachment.width * scale;
    let height = attachment.length * scale;
    let shift = attachment.position * scale;
    let half_width = body.width * scale / 2.0;
    let half_length = body.length * scale / 2.0;

    let (x, y) = match attachment.side {
        AttachmentSide::Front => (-width / 2.0 + shift, -half_length - height),
        AttachmentSide::Rear => (-width / 2.0 + shift, half_length),
        AttachmentSide::Left => (-half_width - width, -height / 2.0 - shift),
        AttachmentSide::Right => (half_width, -height / 2.0 - shift),
    };

    Some(Rect {
        x,
        y,
        width,
        height,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() < EPS, "{} != {}", a, b);
    }

    #[test]
    fn test_heading_unit_directions() {
        let right = Point::heading_unit(0.0);
        assert_close(right.x, 1.0);
        assert_close(right.y, 0.0);

        // 90 degrees points up the field, which is -y on screen
        let up = Point::heading_unit(90.0);
        assert_close(up.x, 0.0);
        assert_close(up.y, -1.0);
    }

    #[test]
    fn test_offset_vector_scaled() {
        let kin = Kinematics::new(5.0, 2.0);
        let v = kin.offset_vector(0.0);
        assert_close(v.x, 10.0);
        assert_close(v.y, 0.0);

        let kin = Kinematics::new(1.0, -3.0);
        let v = kin.offset_vector(90.0);
        assert_close(v.x, 0.0);
        assert_close(v.y, 3.0);
    }

    #[test]
    fn test_trace_point_zero_offset_is_center() {
        let kin = Kinematics::new(1.0, 0.0);
        let pose = Pose::new(12.0, 34.0, 123.0);
        assert_eq!(kin.trace_point(&pose), pose.center);
    }

    #[test]
    fn test_start_pose_heading_zero() {
        let field = FieldGeometry::default();
        let mission = Mission::default()
            .with_start(10.0, 20.0, 0.0)
            .with_body(10.0, 12.0);
        let pose = start_pose(&mission, &field);

        // Length lies along X at heading 0
        assert_close(pose.center.x, 10.0 + 6.0);
        assert_close(pose.center.y, 114.0 - 20.0 - 5.0);
        assert_eq!(pose.heading, 0.0);
    }

    #[test]
    fn test_start_pose_heading_ninety() {
        let field = FieldGeometry::default();
        let mission = Mission::default()
            .with_start(0.0, 0.0, 90.0)
            .with_body(10.0, 12.0);
        let pose = start_pose(&mission, &field);

        assert_close(pose.center.x, 5.0);
        assert_close(pose.center.y, 114.0 - 6.0);
        assert_eq!(pose.heading, 90.0);
    }

    #[test]
    fn test_start_pose_diagonal_uses_rotated_box() {
        let field = FieldGeometry::default();
        let mission = Mission::default()
            .with_start(0.0, 0.0, 45.0)
            .with_body(10.0, 12.0);
        let pose = start_pose(&mission, &field);

        let k = core::f64::consts::FRAC_1_SQRT_2;
        let extent = k * 6.0 + k * 5.0;
        assert_close(pose.center.x, extent);
        assert_close(pose.center.y, 114.0 - extent);
        // A naive half-width placement would be wrong here
        assert!((pose.center.x - 5.0).abs() > 1.0);
    }

    #[test]
    fn test_start_pose_scaled_field() {
        let field = FieldGeometry::new(1000.0, 600.0);
        let mission = Mission::default()
            .with_start(10.0, 10.0, 0.0)
            .with_body(10.0, 20.0);
        let pose = start_pose(&mission, &field);

        assert_close(pose.center.x, 50.0 + 50.0);
        assert_close(pose.center.y, 600.0 - 50.0 - 25.0);
    }

    #[test]
    fn test_start_pose_zero_size_body() {
        let field = FieldGeometry::default();
        let mission = Mission::default()
            .with_start(30.0, 40.0, 30.0)
            .with_body(0.0, -4.0);
        let pose = start_pose(&mission, &field);

        assert_close(pose.center.x, 30.0);
        assert_close(pose.center.y, 114.0 - 40.0);
        assert!(pose.center.x.is_finite() && pose.center.y.is_finite());
    }

    #[test]
    fn test_attachment_rects() {
        let body = BodyDimensions {
            width: 12.0,
            length: 20.0,
        };
        let front = Attachment {
            side: AttachmentSide::Front,
            width: 6.0,
            length: 5.0,
            position: 1.0,
        };
        let rect = attachment_rect(&front, &body, 1.0).unwrap();
        assert_eq!(rect, Rect { x: -2.0, y: -15.0, width: 6.0, height: 5.0 });

        let left = Attachment {
            side: AttachmentSide::Left,
            width: 4.0,
            length: 10.0,
            position: 3.0,
        };
        let rect = attachment_rect(&left, &body, 2.0).unwrap();
        assert_eq!(rect, Rect { x: -20.0, y: -16.0, width: 8.0, height: 20.0 });

        let rear = Attachment {
            side: AttachmentSide::Rear,
            ..front
        };
        assert_eq!(attachment_rect(&rear, &body, 1.0).unwrap().y, 10.0);

        let right = Attachment {
            side: AttachmentSide::Right,
            ..left
        };
        assert_eq!(attachment_rect(&right, &body, 1.0).unwrap().x, 6.0);
    }

    #[test]
    fn test_attachment_without_area() {
        let body = BodyDimensions::default();
        let flat = Attachment {
            side: AttachmentSide::Front,
            width: 0.0,
            length: 5.0,
            position: 0.0,
        };
        assert!(attachment_rect(&flat, &body, 1.0).is_none());
    }
}
