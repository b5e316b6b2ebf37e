use std::{
    fs::File,
    io::{BufRead, BufReader},
    num::ParseFloatError,
    path::{Path, PathBuf},
};

use gts_transforms::PlanarPose;

/// Error types for the trajectory module.
#[derive(Debug, thiserror::Error)]
pub enum TrajectoryError {
    /// The trajectory file does not exist.
    #[error("Trajectory file does not exist: {0}")]
    FileDoesNotExist(PathBuf),

    /// Error reading the trajectory file.
    #[error("Failed to read the trajectory file. {0}")]
    Io(#[from] std::io::Error),

    /// A line is not three comma separated floats.
    #[error("Each pose must be 3 floats, separated by commas. Got: {line}")]
    MalformedLine {
        /// The offending line.
        line: String,
        /// The float conversion failure, if any.
        #[source]
        source: Option<ParseFloatError>,
    },
}

/// Read the poses from a trajectory file.
///
/// The file holds one pose per line as `x, y, theta`, with theta in radians. Whitespace around each
/// value is optional and blank lines are skipped.
///
/// # Arguments
///
/// * `path` - The path to the trajectory file.
///
/// # Returns
///
/// The poses in file order.
pub fn read_trajectory(path: impl AsRef<Path>) -> Result<Vec<PlanarPose>, TrajectoryError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(TrajectoryError::FileDoesNotExist(path.to_path_buf()));
    }

    // open the file and create a buffered reader
    let file = File::open(path)?;
    let trajectory = parse_trajectory(BufReader::new(file))?;
    log::debug!(
        "Read {} poses from {}",
        trajectory.len(),
        path.display()
    );

    Ok(trajectory)
}

/// Parse poses from any buffered reader.
pub fn parse_trajectory(reader: impl BufRead) -> Result<Vec<PlanarPose>, TrajectoryError> {
    let mut trajectory = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        // blank lines carry no pose
        if line.is_empty() {
            continue;
        }
        trajectory.push(parse_trajectory_line(line)?);
    }
    Ok(trajectory)
}

/// Parse a single `x, y, theta` line.
pub fn parse_trajectory_line(line: &str) -> Result<PlanarPose, TrajectoryError> {
    let malformed = |source: Option<ParseFloatError>| TrajectoryError::MalformedLine {
        line: line.to_string(),
        source,
    };

    let parts = line.split(',').collect::<Vec<_>>();
    let [x, y, theta] = parts.as_slice() else {
        return Err(malformed(None));
    };

    let parse = |part: &str| part.trim().parse::<f64>().map_err(|e| malformed(Some(e)));
    Ok(PlanarPose::new(parse(*x)?, parse(*y)?, parse(*theta)?))
}
