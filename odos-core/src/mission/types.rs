//! Mission type definitions
//!
//! A `Mission` is the validated, immutable description of one run. It is
//! produced by [`MissionDocument::normalize`](super::MissionDocument::normalize)
//! and never patched afterwards.

use alloc::vec::Vec;

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum mission name length
pub const MAX_LABEL_LEN: usize = 32;

/// Maximum attachments per body
pub const MAX_ATTACHMENTS: usize = 8;

/// Default body width (cm)
pub const DEFAULT_BODY_WIDTH: f64 = 12.7;

/// Default body length (cm)
pub const DEFAULT_BODY_LENGTH: f64 = 20.5;

/// Kind of mission command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CommandKind {
    /// Straight-line move along the heading
    Move,
    /// Rotation about the trace point
    Rotate,
    /// Unrecognized kind, skipped by the runners
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl CommandKind {
    /// Parse a kind name, case-insensitively
    pub fn parse(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("move") {
            CommandKind::Move
        } else if name.eq_ignore_ascii_case("rotate") {
            CommandKind::Rotate
        } else {
            CommandKind::Unknown
        }
    }
}

/// A single mission command
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Command {
    /// Command kind
    pub kind: CommandKind,
    /// Signed distance (move, physical units) or degree delta (rotate)
    pub magnitude: f64,
}

impl Command {
    /// Create a move command
    pub const fn move_by(distance: f64) -> Self {
        Self {
            kind: CommandKind::Move,
            magnitude: distance,
        }
    }

    /// Create a rotate command
    pub const fn rotate_by(delta_deg: f64) -> Self {
        Self {
            kind: CommandKind::Rotate,
            magnitude: delta_deg,
        }
    }
}

/// Body side an attachment is mounted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AttachmentSide {
    Front,
    Rear,
    Left,
    Right,
}

impl AttachmentSide {
    /// Parse a side name, case-insensitively
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        [
            ("front", AttachmentSide::Front),
            ("rear", AttachmentSide::Rear),
            ("left", AttachmentSide::Left),
            ("right", AttachmentSide::Right),
        ]
        .iter()
        .find(|(label, _)| name.eq_ignore_ascii_case(label))
        .map(|(_, side)| *side)
    }
}

/// Rectangle mounted on one side of the body
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Attachment {
    /// Mounting side
    pub side: AttachmentSide,
    /// Lateral extent (cm)
    pub width: f64,
    /// Longitudinal extent (cm)
    pub length: f64,
    /// Shift along the mounting side (cm)
    pub position: f64,
}

/// Physical body extents
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyDimensions {
    /// Lateral extent (cm)
    pub width: f64,
    /// Longitudinal extent (cm)
    pub length: f64,
}

impl Default for BodyDimensions {
    fn default() -> Self {
        Self {
            width: DEFAULT_BODY_WIDTH,
            length: DEFAULT_BODY_LENGTH,
        }
    }
}

/// Validated mission
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mission {
    /// Display label
    pub name: String<MAX_LABEL_LEN>,
    /// Bottom-left X of the rotated bounding box (cm, Y-up field frame)
    pub start_x: f64,
    /// Bottom-left Y of the rotated bounding box (cm, Y-up field frame)
    pub start_y: f64,
    /// Start heading in degrees, within [0, 360)
    pub start_angle: f64,
    /// Body extents
    pub body: BodyDimensions,
    /// Signed distance from the trace point to the body center (cm)
    pub pivot_offset: f64,
    /// Side attachments
    pub attachments: heapless::Vec<Attachment, MAX_ATTACHMENTS>,
    /// Ordered commands
    pub commands: Vec<Command>,
}

impl Default for Mission {
    fn default() -> Self {
        let mut name = String::new();
        let _ = name.push_str("Untitled Mission");
        Self {
            name,
            start_x: 0.0,
            start_y: 0.0,
            start_angle: 0.0,
            body: BodyDimensions::default(),
            pivot_offset: 0.0,
            attachments: heapless::Vec::new(),
            commands: Vec::new(),
        }
    }
}

impl Mission {
    /// Builder-style start placement; the angle is normalized into [0, 360)
    pub fn with_start(mut self, x: f64, y: f64, angle_deg: f64) -> Self {
        self.start_x = x;
        self.start_y = y;
        self.start_angle = normalize_degrees(angle_deg);
        self
    }

    /// Builder-style body extents
    pub fn with_body(mut self, width: f64, length: f64) -> Self {
        self.body = BodyDimensions { width, length };
        self
    }

    /// Builder-style pivot offset
    pub fn with_pivot_offset(mut self, offset: f64) -> Self {
        self.pivot_offset = offset;
        self
    }

    /// Builder-style command list
    pub fn with_commands(mut self, commands: &[Command]) -> Self {
        self.commands = commands.to_vec();
        self
    }

    /// Count of commands the runners will actually execute
    pub fn executable_commands(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| c.kind != CommandKind::Unknown)
            .count()
    }
}

/// Normalize an angle in degrees into [0, 360)
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = ((angle % 360.0) + 360.0) % 360.0;
    // -0.0 and values that round up to 360 land back on 0
    if a >= 360.0 || a == 0.0 {
        0.0
    } else {
        a
    }
}
