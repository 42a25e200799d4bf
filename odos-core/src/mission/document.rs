//! Loosely-typed mission documents
//!
//! The authoring side hands over a mission as a document whose fields may
//! be missing, non-finite or misspelled. `normalize` resolves every default
//! in one place so the engine never has to.

use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::types::{
    normalize_degrees, Attachment, AttachmentSide, BodyDimensions, Command, CommandKind, Mission,
    DEFAULT_BODY_LENGTH, DEFAULT_BODY_WIDTH, MAX_ATTACHMENTS, MAX_LABEL_LEN,
};

/// Raw command entry
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ActionDocument {
    /// Command kind name ("move" or "rotate")
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: Option<String>,
    /// Distance or degree delta
    pub value: Option<f64>,
}

/// Raw attachment entry
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct AttachmentDocument {
    pub side: Option<String>,
    pub width_cm: Option<f64>,
    pub length_cm: Option<f64>,
    pub position_cm: Option<f64>,
}

/// Raw mission as authored
///
/// Field names follow the authoring format (`startX`, `robotWidthCm`,
/// `offsetY`, `actions`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct MissionDocument {
    pub name: Option<String>,
    pub start_x: Option<f64>,
    pub start_y: Option<f64>,
    pub start_angle: Option<f64>,
    pub robot_width_cm: Option<f64>,
    pub robot_length_cm: Option<f64>,
    pub offset_y: Option<f64>,
    pub attachments: Vec<AttachmentDocument>,
    pub actions: Vec<ActionDocument>,
}

/// Finite value or the fallback
fn number_or(value: Option<f64>, fallback: f64) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => fallback,
    }
}

impl MissionDocument {
    /// Resolve defaults and produce a validated mission
    ///
    /// - non-finite or missing numbers take their defaults
    /// - the start angle is normalized into [0, 360)
    /// - attachments on unknown sides are dropped
    /// - commands keep their order; unknown kinds are kept as
    ///   [`CommandKind::Unknown`] so the runners can skip them
    /// - the name and attachment list are truncated to capacity with a warning
    pub fn normalize(&self) -> Mission {
        let mut mission = Mission::default();

        if let Some(name) = self.name.as_deref().map(str::trim) {
            if !name.is_empty() {
                mission.name.clear();
                for ch in name.chars() {
                    if mission.name.push(ch).is_err() {
                        warn!("mission name truncated to {} bytes", MAX_LABEL_LEN);
                        break;
                    }
                }
            }
        }

        mission.start_x = number_or(self.start_x, 0.0);
        mission.start_y = number_or(self.start_y, 0.0);
        mission.start_angle = normalize_degrees(number_or(self.start_angle, 0.0));
        mission.body = BodyDimensions {
            width: number_or(self.robot_width_cm, DEFAULT_BODY_WIDTH),
            length: number_or(self.robot_length_cm, DEFAULT_BODY_LENGTH),
        };
        mission.pivot_offset = number_or(self.offset_y, 0.0);

        let attachments = self.attachments.iter().filter_map(|a| {
            let side = AttachmentSide::parse(a.side.as_deref()?)?;
            Some(Attachment {
                side,
                width: number_or(a.width_cm, 0.0),
                length: number_or(a.length_cm, 0.0),
                position: number_or(a.position_cm, 0.0),
            })
        });
        for attachment in attachments {
            if mission.attachments.push(attachment).is_err() {
                warn!("more than {} attachments, extra dropped", MAX_ATTACHMENTS);
                break;
            }
        }

        mission.commands = self
            .actions
            .iter()
            .map(|action| Command {
                kind: action
                    .kind
                    .as_deref()
                    .map(CommandKind::parse)
                    .unwrap_or(CommandKind::Unknown),
                magnitude: number_or(action.value, 0.0),
            })
            .collect();

        mission
    }
}

impl From<&Mission> for MissionDocument {
    fn from(mission: &Mission) -> Self {
        Self {
            name: Some(String::from(mission.name.as_str())),
            start_x: Some(mission.start_x),
            start_y: Some(mission.start_y),
            start_angle: Some(mission.start_angle),
            robot_width_cm: Some(mission.body.width),
            robot_length_cm: Some(mission.body.length),
            offset_y: Some(mission.pivot_offset),
            attachments: mission
                .attachments
                .iter()
                .map(|a| AttachmentDocument {
                    side: Some(String::from(match a.side {
                        AttachmentSide::Front => "front",
                        AttachmentSide::Rear => "rear",
                        AttachmentSide::Left => "left",
                        AttachmentSide::Right => "right",
                    })),
                    width_cm: Some(a.width),
                    length_cm: Some(a.length),
                    position_cm: Some(a.position),
                })
                .collect(),
            actions: mission
                .commands
                .iter()
                .map(|c| ActionDocument {
                    kind: match c.kind {
                        CommandKind::Move => Some(String::from("move")),
                        CommandKind::Rotate => Some(String::from("rotate")),
                        CommandKind::Unknown => None,
                    },
                    value: Some(c.magnitude),
                })
                .collect(),
        }
    }
}
