//! Logging renderer
//!
//! Headless stand-in for a drawing surface. Poses go to the debug log and
//! trace points are kept so the run can be summarized at the end.

use odos_core::motion::Point;
use odos_core::traits::Renderer;

#[derive(Debug, Default)]
pub struct LogRenderer {
    pose_updates: usize,
    trace: Vec<Point>,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pose_updates(&self) -> usize {
        self.pose_updates
    }

    pub fn trace(&self) -> &[Point] {
        &self.trace
    }

    /// Length of the drawn trace polyline in rendering units
    pub fn trace_length(&self) -> f64 {
        self.trace
            .windows(2)
            .map(|pair| pair[0].distance_to(pair[1]))
            .sum()
    }
}

impl Renderer for LogRenderer {
    fn update_pose(&mut self, center: Point, heading: f64) {
        self.pose_updates += 1;
        log::debug!(
            "pose ({:.2}, {:.2}) heading {:.1}",
            center.x,
            center.y,
            heading
        );
    }

    fn trace_point(&mut self, point: Point) {
        self.trace.push(point);
    }

    fn replace_trace(&mut self, points: &[Point]) {
        self.trace.clear();
        self.trace.extend_from_slice(points);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_length() {
        let mut r = LogRenderer::new();
        r.trace_point(Point::new(0.0, 0.0));
        r.trace_point(Point::new(3.0, 4.0));
        r.trace_point(Point::new(3.0, 10.0));
        assert!((r.trace_length() - 11.0).abs() < 1e-12);

        r.replace_trace(&[Point::new(1.0, 1.0)]);
        assert_eq!(r.trace().len(), 1);
        assert_eq!(r.trace_length(), 0.0);
    }

    #[test]
    fn test_pose_updates_counted() {
        let mut r = LogRenderer::new();
        r.update_pose(Point::new(1.0, 2.0), 90.0);
        r.update_pose(Point::new(1.0, 3.0), 90.0);
        assert_eq!(r.pose_updates(), 2);
    }
}
