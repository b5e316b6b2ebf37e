use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use gts_transforms::{make_transform, IntrinsicMatrix, PlanarPose, Transform};

use crate::naming::NameConfigurator;

/// The subfolder of the output folder holding the camera files.
pub const CAMERA_PROPERTIES_DIR: &str = "camera_properties";

/// Error types for the writer module.
#[derive(Debug, thiserror::Error)]
pub enum WriterError {
    /// Error creating a folder or writing a file.
    #[error("Failed to write the file. {0}")]
    Io(#[from] std::io::Error),

    /// The pose and image lists differ in length.
    #[error(
        "Provided lists must be the same length: {poses_world} world poses, \
         {poses_pixel} pixel poses, {image_paths} image paths"
    )]
    LengthMismatch {
        /// Number of world poses.
        poses_world: usize,
        /// Number of pixel poses.
        poses_pixel: usize,
        /// Number of image paths.
        image_paths: usize,
    },
}

/// The paths of the three list files written for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListFiles {
    /// Image paths only.
    pub test: PathBuf,
    /// Image paths alternating with image corner poses in pixels.
    pub txt: PathBuf,
    /// Image paths alternating with robot poses in meters.
    pub meters_txt: PathBuf,
}

/// Create the `camera_properties` folder under the output folder if it does not exist.
///
/// # Returns
///
/// The path of the `camera_properties` folder.
pub fn prepare_output_folder(output_folder: impl AsRef<Path>) -> Result<PathBuf, WriterError> {
    let camera_folder = output_folder.as_ref().join(CAMERA_PROPERTIES_DIR);
    if !camera_folder.exists() {
        fs::create_dir_all(&camera_folder)?;
        log::debug!("Created {}", camera_folder.display());
    }
    Ok(camera_folder)
}

/// Format a matrix as one row per line, values separated by a space with 6 decimals.
pub fn format_matrix_rows<const R: usize, const C: usize>(rows: &[[f64; C]; R]) -> String {
    rows.iter()
        .map(|row| {
            let line = row
                .iter()
                .map(|value| format!("{value:.6}"))
                .collect::<Vec<_>>()
                .join(" ");
            line + "\n"
        })
        .collect()
}

/// Format a planar pose as the 9 values of its 3x3 homogeneous matrix on a single line.
///
/// `R00 R01 Tx R10 R11 Ty 0 0 1`
pub fn format_planar_pose_row(pose: &PlanarPose) -> String {
    let rows = make_transform(pose.x, pose.y, 0.0, 0.0, 0.0, pose.theta).rows();
    [
        rows[0][0], rows[0][1], rows[0][3], rows[1][0], rows[1][1], rows[1][3], 0.0, 0.0, 1.0,
    ]
    .iter()
    .map(|value| format!("{value:.6}"))
    .collect::<Vec<_>>()
    .join(" ")
}

/// Write the camera intrinsic matrix.
///
/// The file is `<output_folder>/camera_properties/<camera_name>_intrinsic_matrix.txt` with one
/// matrix row per line.
///
/// # Returns
///
/// The path of the written file.
pub fn write_intrinsic_matrix(
    matrix: &IntrinsicMatrix,
    camera_name: &str,
    output_folder: impl AsRef<Path>,
) -> Result<PathBuf, WriterError> {
    let file_path =
        prepare_output_folder(output_folder)?.join(format!("{camera_name}_intrinsic_matrix.txt"));
    fs::write(&file_path, format_matrix_rows(&matrix.rows()))?;
    log::debug!("Wrote {}", file_path.display());
    Ok(file_path)
}

/// Write the pose of the camera as measured from the robot.
///
/// The file is `<output_folder>/camera_properties/<camera_name>_pose.txt` with one matrix row per
/// line.
///
/// # Returns
///
/// The path of the written file.
pub fn write_camera_pose(
    transform: &Transform,
    camera_name: &str,
    output_folder: impl AsRef<Path>,
) -> Result<PathBuf, WriterError> {
    let file_path = prepare_output_folder(output_folder)?.join(format!("{camera_name}_pose.txt"));
    fs::write(&file_path, format_matrix_rows(&transform.rows()))?;
    log::debug!("Wrote {}", file_path.display());
    Ok(file_path)
}

/// Write the three list files pairing images with their ground truth poses.
///
/// The files are named by `namer` and located in its output folder. The first element of each
/// list belongs to the first image, and so on.
///
/// # Arguments
///
/// * `namer` - Names the list files.
/// * `poses_world` - Robot poses, in meters and radians.
/// * `poses_pixel` - Image corner poses in the global aligned image, in pixels and radians.
/// * `image_paths` - Image paths, relative to the output folder.
///
/// # Errors
///
/// [`WriterError::LengthMismatch`] if the three lists differ in length.
pub fn write_list_files(
    namer: &NameConfigurator,
    poses_world: &[PlanarPose],
    poses_pixel: &[PlanarPose],
    image_paths: &[PathBuf],
) -> Result<ListFiles, WriterError> {
    if poses_world.len() != poses_pixel.len() || poses_world.len() != image_paths.len() {
        return Err(WriterError::LengthMismatch {
            poses_world: poses_world.len(),
            poses_pixel: poses_pixel.len(),
            image_paths: image_paths.len(),
        });
    }

    let image_lines = image_paths
        .iter()
        .map(|path| {
            let path = path.strip_prefix(namer.output_folder()).unwrap_or(path.as_path());
            path.display().to_string()
        })
        .collect::<Vec<_>>();

    let files = ListFiles {
        test: namer.test_file(),
        txt: namer.txt_file(),
        meters_txt: namer.meters_txt_file(),
    };

    let mut test_file = BufWriter::new(File::create(&files.test)?);
    for line in &image_lines {
        writeln!(test_file, "{line}")?;
    }
    test_file.flush()?;

    write_pose_list(&files.meters_txt, &image_lines, poses_world)?;
    write_pose_list(&files.txt, &image_lines, poses_pixel)?;

    log::debug!(
        "Wrote {} entries to {}, {} and {}",
        image_lines.len(),
        files.test.display(),
        files.meters_txt.display(),
        files.txt.display()
    );

    Ok(files)
}

fn write_pose_list(
    file_path: &Path,
    image_lines: &[String],
    poses: &[PlanarPose],
) -> Result<(), WriterError> {
    let mut file = BufWriter::new(File::create(file_path)?);
    for (image_line, pose) in image_lines.iter().zip(poses) {
        writeln!(file, "{image_line}")?;
        writeln!(file, "{}", format_planar_pose_row(pose))?;
    }
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::SequenceIdentity;
    use chrono::NaiveDate;
    use std::f64::consts::FRAC_PI_2;

    fn namer(output: &Path) -> NameConfigurator {
        let identity = SequenceIdentity {
            sequence_type: "regular".to_string(),
            sequence_number: 3,
            texture_number: 1,
            camera_name: "c55".to_string(),
        };
        let date = NaiveDate::from_ymd_opt(2022, 3, 14).expect("valid date");
        NameConfigurator::new(output, identity, date)
    }

    #[test]
    fn test_format_planar_pose_row() {
        assert_eq!(
            format_planar_pose_row(&PlanarPose::new(0.0, 0.0, 0.0)),
            "1.000000 0.000000 0.000000 0.000000 1.000000 0.000000 0.000000 0.000000 1.000000"
        );
        assert_eq!(
            format_planar_pose_row(&PlanarPose::new(1.0, 2.0, FRAC_PI_2)),
            "0.000000 -1.000000 1.000000 1.000000 0.000000 2.000000 0.000000 0.000000 1.000000"
        );
    }

    #[test]
    fn test_write_intrinsic_matrix() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let matrix = IntrinsicMatrix::new(800.0, 600.0, 0.0, 320.0, 240.0)?;
        let file_path = write_intrinsic_matrix(&matrix, "c55", tmp_dir.path())?;
        assert_eq!(
            file_path,
            tmp_dir
                .path()
                .join("camera_properties")
                .join("c55_intrinsic_matrix.txt")
        );
        assert_eq!(
            fs::read_to_string(&file_path)?,
            "800.000000 0.000000 320.000000\n0.000000 600.000000 240.000000\n0.000000 0.000000 1.000000\n"
        );
        Ok(())
    }

    #[test]
    fn test_write_camera_pose() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let pose = make_transform(0.1, 0.2, 0.3, 0.0, 0.0, 0.0);
        let file_path = write_camera_pose(&pose, "c55", tmp_dir.path())?;
        assert!(file_path.ends_with("camera_properties/c55_pose.txt"));
        assert_eq!(
            fs::read_to_string(&file_path)?,
            "1.000000 0.000000 0.000000 0.100000\n\
             0.000000 1.000000 0.000000 0.200000\n\
             0.000000 0.000000 1.000000 0.300000\n\
             0.000000 0.000000 0.000000 1.000000\n"
        );

        // rewriting into an existing folder is fine
        let pose = make_transform(0.0, 0.0, 0.5, 0.0, FRAC_PI_2, 0.0);
        write_camera_pose(&pose, "c55", tmp_dir.path())?;
        let values = fs::read_to_string(&file_path)?
            .lines()
            .map(|line| {
                line.split(' ')
                    .map(|v| v.parse::<f64>())
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;
        assert_eq!(values.len(), 4);
        assert_eq!(values[0], vec![0.0, 0.0, 1.0, 0.0]);
        assert_eq!(values[2], vec![-1.0, 0.0, 0.0, 0.5]);
        assert_eq!(values[3], vec![0.0, 0.0, 0.0, 1.0]);
        Ok(())
    }

    #[test]
    fn test_write_list_files() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let namer = namer(tmp_dir.path());
        let poses_world = [
            PlanarPose::new(0.0, 0.0, 0.0),
            PlanarPose::new(1.0, 2.0, FRAC_PI_2),
        ];
        let poses_pixel = [
            PlanarPose::new(0.0, 0.0, 0.0),
            PlanarPose::new(5.0, 4.0, FRAC_PI_2),
        ];
        let image_paths = vec![namer.relative_image_path(0), namer.image_path(1)];

        let files = write_list_files(&namer, &poses_world, &poses_pixel, &image_paths)?;
        assert_eq!(files.test, tmp_dir.path().join("regular_220314.test"));

        let image_0 = "regular/220314/seq0003/HDG2_t001_regular_2022-03-14_s0003_c55_i0000000.png";
        let image_1 = "regular/220314/seq0003/HDG2_t001_regular_2022-03-14_s0003_c55_i0000001.png";
        let identity_row =
            "1.000000 0.000000 0.000000 0.000000 1.000000 0.000000 0.000000 0.000000 1.000000";

        assert_eq!(
            fs::read_to_string(&files.test)?,
            format!("{image_0}\n{image_1}\n")
        );
        assert_eq!(
            fs::read_to_string(&files.meters_txt)?,
            format!(
                "{image_0}\n{identity_row}\n{image_1}\n\
                 0.000000 -1.000000 1.000000 1.000000 0.000000 2.000000 0.000000 0.000000 1.000000\n"
            )
        );
        assert_eq!(
            fs::read_to_string(&files.txt)?,
            format!(
                "{image_0}\n{identity_row}\n{image_1}\n\
                 0.000000 -1.000000 5.000000 1.000000 0.000000 4.000000 0.000000 0.000000 1.000000\n"
            )
        );
        Ok(())
    }

    #[test]
    fn test_write_list_files_empty() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let files = write_list_files(&namer(tmp_dir.path()), &[], &[], &[])?;
        assert_eq!(fs::read_to_string(&files.test)?, "");
        assert_eq!(fs::read_to_string(&files.txt)?, "");
        assert_eq!(fs::read_to_string(&files.meters_txt)?, "");
        Ok(())
    }

    #[test]
    fn test_write_list_files_length_mismatch() -> Result<(), Box<dyn std::error::Error>> {
        let tmp_dir = tempfile::tempdir()?;
        let namer = namer(tmp_dir.path());
        let poses = [PlanarPose::default(); 2];
        let result = write_list_files(&namer, &poses, &poses[..1], &[namer.relative_image_path(0)]);
        assert!(matches!(
            result,
            Err(WriterError::LengthMismatch {
                poses_world: 2,
                poses_pixel: 1,
                image_paths: 1
            })
        ));
        assert!(!namer.test_file().exists());
        Ok(())
    }
}
