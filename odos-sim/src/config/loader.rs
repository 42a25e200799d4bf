//! Settings and mission file loading

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use odos_core::mission::{Command, Mission, MissionDocument};

use super::HostConfig;

/// Settings files tried when no path is given
const DEFAULT_CONFIG_PATHS: &[&str] = &["odos.toml", "/etc/odos/odos.toml"];

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse and validate a settings document
pub fn parse_config(text: &str) -> Result<HostConfig, ConfigError> {
    let config: HostConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Parse a mission document and normalize it
pub fn parse_mission(text: &str) -> Result<Mission, ConfigError> {
    let document: MissionDocument = toml::from_str(text)?;
    Ok(document.normalize())
}

/// Load settings, falling back to defaults on any failure
pub fn load_config(path: Option<&Path>) -> HostConfig {
    match path {
        Some(path) => match read(path).and_then(|text| parse_config(&text)) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                log_config_summary(&config);
                config
            }
            Err(e) => {
                log::warn!("{}; using defaults", e);
                HostConfig::default()
            }
        },
        None => {
            for candidate in DEFAULT_CONFIG_PATHS {
                let candidate = Path::new(candidate);
                if let Ok(config) = read(candidate).and_then(|text| parse_config(&text)) {
                    log::info!("Loaded config from {}", candidate.display());
                    log_config_summary(&config);
                    return config;
                }
            }
            log::info!("No config file found, using defaults");
            HostConfig::default()
        }
    }
}

/// Load a mission file, or the built-in demo mission when no path is given
pub fn load_mission(path: Option<&Path>) -> Result<Mission, ConfigError> {
    let mission = match path {
        Some(path) => {
            let mission = parse_mission(&read(path)?)?;
            log::info!("Loaded mission '{}' from {}", mission.name, path.display());
            mission
        }
        None => {
            log::info!("No mission file given, using the demo mission");
            demo_mission()
        }
    };

    log::debug!(
        "  start ({}, {}) at {} deg, {} commands",
        mission.start_x,
        mission.start_y,
        mission.start_angle,
        mission.commands.len()
    );
    Ok(mission)
}

/// Up, turn right, then across
fn demo_mission() -> Mission {
    Mission::default()
        .with_start(0.0, 0.0, 90.0)
        .with_body(10.0, 12.0)
        .with_commands(&[
            Command::move_by(50.0),
            Command::rotate_by(-90.0),
            Command::move_by(30.0),
        ])
}

fn log_config_summary(config: &HostConfig) {
    log::debug!(
        "  motion: {} cm/s, {} deg/s, trace {}",
        config.motion.linear_speed,
        config.motion.angular_speed,
        if config.motion.trace { "on" } else { "off" }
    );
    log::debug!("  replay: {} fps", config.replay.fps);
    log::debug!(
        "  field: {} cm across {}x{} units",
        config.field.physical_width,
        config.field.render_width,
        config.field.render_height
    );
}
