//! Host configuration
//!
//! Loads the simulator settings and mission documents from TOML files.
//! Missing or broken settings files fall back to the built-in defaults.

pub mod loader;

use serde::Deserialize;

use odos_core::config::{
    FieldGeometry, SimConfig, DEFAULT_ANGULAR_SPEED, DEFAULT_LINEAR_SPEED, DEFAULT_REPLAY_FPS,
};

pub use loader::{load_config, load_mission, ConfigError};

/// Simulator settings file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub motion: MotionSection,
    pub replay: ReplaySection,
    pub field: FieldGeometry,
}

/// `[motion]` section
#[derive(Debug, Clone, Deserialize)]
pub struct MotionSection {
    /// Move speed in cm/s (default: 20)
    #[serde(default = "default_linear_speed")]
    pub linear_speed: f64,

    /// Rotation speed in deg/s (default: 45)
    #[serde(default = "default_angular_speed")]
    pub angular_speed: f64,

    /// Draw the trace (default: true)
    #[serde(default = "default_trace")]
    pub trace: bool,
}

impl Default for MotionSection {
    fn default() -> Self {
        Self {
            linear_speed: default_linear_speed(),
            angular_speed: default_angular_speed(),
            trace: default_trace(),
        }
    }
}

/// `[replay]` section
#[derive(Debug, Clone, Deserialize)]
pub struct ReplaySection {
    /// Replay sample rate (default: 60)
    #[serde(default = "default_replay_fps")]
    pub fps: f64,
}

impl Default for ReplaySection {
    fn default() -> Self {
        Self {
            fps: default_replay_fps(),
        }
    }
}

impl HostConfig {
    /// Engine configuration, clamped into usable ranges
    pub fn sim_config(&self) -> SimConfig {
        SimConfig {
            linear_speed: self.motion.linear_speed,
            angular_speed: self.motion.angular_speed,
            replay_fps: self.replay.fps,
            trace_enabled: self.motion.trace,
        }
        .sanitized()
    }

    pub fn field_geometry(&self) -> FieldGeometry {
        self.field
    }

    /// Reject settings that cannot be clamped into something meaningful
    pub fn validate(&self) -> Result<(), ConfigError> {
        let field = &self.field;
        for (name, value) in [
            ("field.physical_width", field.physical_width),
            ("field.render_width", field.render_width),
            ("field.render_height", field.render_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

fn default_linear_speed() -> f64 {
    DEFAULT_LINEAR_SPEED
}
fn default_angular_speed() -> f64 {
    DEFAULT_ANGULAR_SPEED
}
fn default_trace() -> bool {
    true
}
fn default_replay_fps() -> f64 {
    DEFAULT_REPLAY_FPS
}
