use std::path::{Path, PathBuf};

use gts_transforms::{Pose6, Transform};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::naming::SequenceIdentity;

/// The camera mounting pose used for every field missing from the configuration.
///
/// The camera sits at the robot origin and points straight down.
pub const DEFAULT_CAMERA_POSE: Pose6 = Pose6 {
    x: 0.0,
    y: 0.0,
    z: 0.0,
    roll: 0.0,
    pitch: std::f64::consts::FRAC_PI_2,
    yaw: 0.0,
};

/// Error types for the configuration module.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("Configuration file does not exist: {0}")]
    FileDoesNotExist(PathBuf),

    /// Error reading the configuration file.
    #[error("Failed to read the configuration file. {0}")]
    Io(#[from] std::io::Error),

    /// The configuration is not valid JSON.
    #[error("Failed to parse the configuration. {0}")]
    Parse(#[from] serde_json::Error),

    /// A required entry is missing.
    #[error("Required value `{key}` missing from the {section} section")]
    MissingKey {
        /// The section the entry belongs to.
        section: &'static str,
        /// The missing entry.
        key: &'static str,
    },

    /// An entry has the wrong type.
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidType {
        /// The offending entry.
        field: String,
        /// What was expected.
        reason: String,
    },
}

/// The camera block of the configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CameraConfig {
    /// The name of the camera in the renderer.
    pub name: String,
    /// The pose of the camera as measured from the robot.
    #[serde(flatten)]
    pub pose: Pose6,
}

impl CameraConfig {
    /// The homogeneous transform of the camera as measured from the robot.
    pub fn transform(&self) -> Transform {
        self.pose.to_transform()
    }
}

/// A validated run configuration with every optional value filled in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    /// The root folder under which all data is written.
    pub output: PathBuf,
    /// The trajectory file to read poses from.
    pub trajectory: PathBuf,
    /// The camera name and mounting pose.
    pub camera: CameraConfig,
    /// The identity of the run.
    pub sequence: SequenceIdentity,
}

impl Configuration {
    /// Validate a parsed JSON document and fill in default values.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingKey`] if a required entry is missing and
    /// [`ConfigError::InvalidType`] if an entry has the wrong type.
    pub fn from_value(value: &Value) -> Result<Self, ConfigError> {
        let root = as_object("configuration", value)?;
        for key in ["output", "trajectory", "camera", "sequence"] {
            require(root, "top level", key)?;
        }

        let camera_block = as_object("camera", require(root, "top level", "camera")?)?;
        let name = as_string("camera.name", require(camera_block, "camera", "name")?)?;
        let pose = Pose6 {
            x: optional_f64(camera_block, "x", DEFAULT_CAMERA_POSE.x)?,
            y: optional_f64(camera_block, "y", DEFAULT_CAMERA_POSE.y)?,
            z: optional_f64(camera_block, "z", DEFAULT_CAMERA_POSE.z)?,
            roll: optional_f64(camera_block, "roll", DEFAULT_CAMERA_POSE.roll)?,
            pitch: optional_f64(camera_block, "pitch", DEFAULT_CAMERA_POSE.pitch)?,
            yaw: optional_f64(camera_block, "yaw", DEFAULT_CAMERA_POSE.yaw)?,
        };

        let sequence_block = as_object("sequence", require(root, "top level", "sequence")?)?;
        for key in ["texture_number", "sequence_type", "sequence_number"] {
            require(sequence_block, "sequence", key)?;
        }
        let sequence = SequenceIdentity {
            sequence_type: as_string(
                "sequence.sequence_type",
                require(sequence_block, "sequence", "sequence_type")?,
            )?,
            sequence_number: as_index(
                "sequence.sequence_number",
                require(sequence_block, "sequence", "sequence_number")?,
            )?,
            texture_number: as_index(
                "sequence.texture_number",
                require(sequence_block, "sequence", "texture_number")?,
            )?,
            camera_name: name.clone(),
        };

        Ok(Self {
            output: as_string("output", require(root, "top level", "output")?)?.into(),
            trajectory: as_string("trajectory", require(root, "top level", "trajectory")?)?.into(),
            camera: CameraConfig { name, pose },
            sequence,
        })
    }
}

/// Parse and validate a configuration from JSON text.
pub fn parse_configuration(text: &str) -> Result<Configuration, ConfigError> {
    let value: Value = serde_json::from_str(text)?;
    Configuration::from_value(&value)
}

/// Read and validate a configuration JSON file.
///
/// # Arguments
///
/// * `path` - The path to the configuration file.
///
/// # Returns
///
/// The validated configuration, with defaults applied to optional camera values.
pub fn load_configuration(path: impl AsRef<Path>) -> Result<Configuration, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::FileDoesNotExist(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path)?;
    let configuration = parse_configuration(&text)?;
    log::debug!("Loaded configuration from {}", path.display());

    Ok(configuration)
}

fn require<'a>(
    object: &'a Map<String, Value>,
    section: &'static str,
    key: &'static str,
) -> Result<&'a Value, ConfigError> {
    object
        .get(key)
        .ok_or(ConfigError::MissingKey { section, key })
}

fn invalid(field: &str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidType {
        field: field.to_string(),
        reason: reason.into(),
    }
}

fn as_object<'a>(field: &str, value: &'a Value) -> Result<&'a Map<String, Value>, ConfigError> {
    value
        .as_object()
        .ok_or_else(|| invalid(field, format!("expected an object, got {value}")))
}

fn as_string(field: &str, value: &Value) -> Result<String, ConfigError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(field, format!("expected a string, got {value}")))
}

fn optional_f64(
    object: &Map<String, Value>,
    key: &'static str,
    default: f64,
) -> Result<f64, ConfigError> {
    match object.get(key) {
        None => Ok(default),
        Some(value) => value
            .as_f64()
            .ok_or_else(|| invalid(&format!("camera.{key}"), format!("expected a number, got {value}"))),
    }
}

/// Accepts non-negative integers and strings made only of digits.
fn as_index(field: &str, value: &Value) -> Result<u32, ConfigError> {
    let parsed = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => {
            let text = text.trim();
            if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
                text.parse::<u64>().ok()
            } else {
                None
            }
        }
        _ => None,
    };

    parsed
        .and_then(|index| u32::try_from(index).ok())
        .ok_or_else(|| invalid(field, format!("must be an integer, got {value}")))
}
