//! Configuration type definitions
//!
//! Run-wide settings shared by the live runner and the replay
//! synthesizer. Values arriving from the host are clamped here rather
//! than rejected.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default linear speed in physical units (cm) per second
pub const DEFAULT_LINEAR_SPEED: f64 = 20.0;

/// Default angular speed in degrees per second
pub const DEFAULT_ANGULAR_SPEED: f64 = 45.0;

/// Default replay sample rate
pub const DEFAULT_REPLAY_FPS: f64 = 60.0;

/// Lowest usable linear speed
pub const MIN_LINEAR_SPEED: f64 = 0.1;

/// Lowest usable angular speed
pub const MIN_ANGULAR_SPEED: f64 = 1.0;

/// Lowest replay sample rate
pub const MIN_REPLAY_FPS: f64 = 10.0;

/// Physical width of the standard field (cm)
pub const DEFAULT_FIELD_WIDTH: f64 = 200.0;

/// Motion and sampling configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Move speed in physical units per second (affects moves only)
    pub linear_speed: f64,
    /// Rotation speed in degrees per second (affects rotations only)
    pub angular_speed: f64,
    /// Replay sample density in frames per second
    pub replay_fps: f64,
    /// Emit trace points to the renderer
    pub trace_enabled: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            linear_speed: DEFAULT_LINEAR_SPEED,
            angular_speed: DEFAULT_ANGULAR_SPEED,
            replay_fps: DEFAULT_REPLAY_FPS,
            trace_enabled: true,
        }
    }
}

impl SimConfig {
    /// Return a copy with every value clamped into its usable range
    ///
    /// Non-finite values fall back to the defaults; finite values below
    /// the floor are raised to the floor.
    pub fn sanitized(&self) -> Self {
        Self {
            linear_speed: clamp_floor(
                "linear_speed",
                self.linear_speed,
                MIN_LINEAR_SPEED,
                DEFAULT_LINEAR_SPEED,
            ),
            angular_speed: clamp_floor(
                "angular_speed",
                self.angular_speed,
                MIN_ANGULAR_SPEED,
                DEFAULT_ANGULAR_SPEED,
            ),
            replay_fps: clamp_floor(
                "replay_fps",
                self.replay_fps,
                MIN_REPLAY_FPS,
                DEFAULT_REPLAY_FPS,
            ),
            trace_enabled: self.trace_enabled,
        }
    }
}

fn clamp_floor(name: &str, value: f64, floor: f64, fallback: f64) -> f64 {
    if !value.is_finite() {
        warn!("{} is not finite, using {}", name, fallback);
        fallback
    } else if value < floor {
        warn!("{} = {} below floor, clamped to {}", name, value, floor);
        floor
    } else {
        value
    }
}

/// Field geometry
///
/// Maps the physical field onto the renderer's coordinate space. The
/// scale is uniform in X and Y and derived from the widths.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldGeometry {
    /// Physical field width (cm)
    pub physical_width: f64,
    /// Renderer width (rendering units)
    pub render_width: f64,
    /// Renderer height (rendering units); Y grows downward
    pub render_height: f64,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            physical_width: DEFAULT_FIELD_WIDTH,
            render_width: 200.0,
            render_height: 114.0,
        }
    }
}

impl FieldGeometry {
    /// Create a field with the standard physical width
    pub const fn new(render_width: f64, render_height: f64) -> Self {
        Self {
            physical_width: DEFAULT_FIELD_WIDTH,
            render_width,
            render_height,
        }
    }

    /// Rendering units per physical unit
    pub fn scale(&self) -> f64 {
        if self.physical_width > 0.0 && self.physical_width.is_finite() {
            self.render_width / self.physical_width
        } else {
            1.0
        }
    }
}
