use argh::FromArgs;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use ground_texture_sim::{
    render::{
        load_inputs, CameraPlacement, DatasetGenerator, Renderer, SensorFit, SensorSettings,
    },
    transforms::{IntrinsicMatrix, Transform},
};

#[derive(FromArgs)]
/// Validate a dataset configuration and plan every render without producing images.
struct Args {
    /// path to the configuration JSON file
    #[argh(option, short = 'c')]
    config: PathBuf,

    /// date used to name the output, as YYYY-MM-DD. Defaults to today.
    #[argh(option)]
    date: Option<NaiveDate>,

    /// name of the camera in the scene. Defaults to the configured camera.
    #[argh(option)]
    scene_camera: Option<String>,

    /// focal length in millimeters
    #[argh(option, default = "50.0")]
    focal_length: f64,

    /// image width in pixels
    #[argh(option, default = "1920")]
    width: u32,

    /// image height in pixels
    #[argh(option, default = "1080")]
    height: u32,

    /// fit the sensor height to the image height
    #[argh(switch)]
    vertical_fit: bool,
}

#[derive(Debug, thiserror::Error)]
enum DryRunError {
    #[error("{0} is not a camera in the scene")]
    UnknownCamera(String),

    #[error(transparent)]
    Sensor(#[from] ground_texture_sim::transforms::TransformError),
}

/// Logs where the renderer camera would be placed for each image.
struct DryRunRenderer {
    camera_name: String,
    sensor: SensorSettings,
}

impl Renderer for DryRunRenderer {
    type Error = DryRunError;

    fn intrinsic_matrix(&self, camera_name: &str) -> Result<IntrinsicMatrix, Self::Error> {
        if camera_name != self.camera_name {
            return Err(DryRunError::UnknownCamera(camera_name.to_string()));
        }
        Ok(self.sensor.intrinsic_matrix()?)
    }

    fn render(
        &mut self,
        camera_name: &str,
        image_path: &Path,
        camera_world_pose: &Transform,
    ) -> Result<(), Self::Error> {
        let placement = CameraPlacement::from_camera_pose(camera_world_pose);
        log::info!(
            "{camera_name} at {:?} euler {:?} -> {}",
            placement.location.to_array(),
            placement.rotation_euler.to_array(),
            image_path.display()
        );
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let (config, trajectory) = load_inputs(&args.config)?;
    println!(
        "Loaded {} poses for camera {}",
        trajectory.len(),
        config.camera.name
    );

    let renderer = DryRunRenderer {
        camera_name: args
            .scene_camera
            .unwrap_or_else(|| config.camera.name.clone()),
        sensor: SensorSettings {
            focal_length_mm: args.focal_length,
            resolution_x: args.width,
            resolution_y: args.height,
            sensor_fit: if args.vertical_fit {
                SensorFit::Vertical
            } else {
                SensorFit::Auto
            },
            ..Default::default()
        },
    };

    let date = args
        .date
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let mut generator = DatasetGenerator::new(config, trajectory, renderer, date)?;
    let summary = generator.run()?;

    println!("Planned {} images", summary.image_count);
    println!("Intrinsics: {}", summary.intrinsic_matrix_file.display());
    println!("Camera pose: {}", summary.camera_pose_file.display());
    println!("List files: {}", summary.list_files.test.display());

    Ok(())
}
