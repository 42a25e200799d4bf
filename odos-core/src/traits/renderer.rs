//! Renderer trait
//!
//! The engine never draws. It pushes body poses and trace points to a
//! renderer supplied by the host.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::motion::Point;

/// Trait for pose and trace sinks
pub trait Renderer {
    /// Move the body to a new pose (rendering units, degrees)
    fn update_pose(&mut self, center: Point, heading: f64);

    /// Append one point to the drawn trace
    fn trace_point(&mut self, point: Point);

    /// Replace the whole drawn trace
    ///
    /// Used by replay scrubbing, where the polyline is recomputed from the
    /// frame list instead of accumulated.
    fn replace_trace(&mut self, points: &[Point]);
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn update_pose(&mut self, center: Point, heading: f64) {
        (**self).update_pose(center, heading)
    }

    fn trace_point(&mut self, point: Point) {
        (**self).trace_point(point)
    }

    fn replace_trace(&mut self, points: &[Point]) {
        (**self).replace_trace(points)
    }
}

impl<R: Renderer + ?Sized> Renderer for Rc<RefCell<R>> {
    fn update_pose(&mut self, center: Point, heading: f64) {
        self.borrow_mut().update_pose(center, heading)
    }

    fn trace_point(&mut self, point: Point) {
        self.borrow_mut().trace_point(point)
    }

    fn replace_trace(&mut self, points: &[Point]) {
        self.borrow_mut().replace_trace(points)
    }
}

/// Renderer that records everything it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    /// Every pose update, in order
    pub poses: Vec<(Point, f64)>,
    /// Current trace
    pub trace: Vec<Point>,
    /// Number of whole-trace replacements
    pub trace_replacements: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last pose pushed, if any
    pub fn last_pose(&self) -> Option<(Point, f64)> {
        self.poses.last().copied()
    }

    /// Total callbacks received
    pub fn callback_count(&self) -> usize {
        self.poses.len() + self.trace.len() + self.trace_replacements
    }
}

impl Renderer for RecordingRenderer {
    fn update_pose(&mut self, center: Point, heading: f64) {
        self.poses.push((center, heading));
    }

    fn trace_point(&mut self, point: Point) {
        self.trace.push(point);
    }

    fn replace_trace(&mut self, points: &[Point]) {
        self.trace.clear();
        self.trace.extend_from_slice(points);
        self.trace_replacements += 1;
    }
}
