#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Run configuration loading and validation.
pub mod config;

/// Output folder and file naming.
pub mod naming;

/// Trajectory file reading.
pub mod trajectory;

/// Camera property and list file writing.
pub mod writer;

pub use config::{load_configuration, parse_configuration, CameraConfig, ConfigError, Configuration};
pub use naming::{NameConfigurator, SequenceIdentity};
pub use trajectory::{read_trajectory, TrajectoryError};
pub use writer::{
    write_camera_pose, write_intrinsic_matrix, write_list_files, ListFiles, WriterError,
};
