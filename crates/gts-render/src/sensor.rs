use gts_transforms::{IntrinsicMatrix, TransformError};

/// Which sensor dimension maps onto the image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SensorFit {
    /// Treated as a horizontal fit.
    #[default]
    Auto,
    /// Fit the sensor width to the image width.
    Horizontal,
    /// Fit the sensor height to the image height.
    Vertical,
}

/// Physical camera and output resolution settings of a renderer scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorSettings {
    /// Focal length, in millimeters.
    pub focal_length_mm: f64,
    /// Sensor width, in millimeters.
    pub sensor_width_mm: f64,
    /// Sensor height, in millimeters.
    pub sensor_height_mm: f64,
    /// Image width at 100%, in pixels.
    pub resolution_x: u32,
    /// Image height at 100%, in pixels.
    pub resolution_y: u32,
    /// Scale applied to the resolution, in percent.
    pub resolution_percentage: f64,
    /// Horizontal pixel aspect.
    pub pixel_aspect_x: f64,
    /// Vertical pixel aspect.
    pub pixel_aspect_y: f64,
    /// How the sensor maps onto the image.
    pub sensor_fit: SensorFit,
}

impl Default for SensorSettings {
    fn default() -> Self {
        Self {
            focal_length_mm: 50.0,
            sensor_width_mm: 36.0,
            sensor_height_mm: 24.0,
            resolution_x: 1920,
            resolution_y: 1080,
            resolution_percentage: 100.0,
            pixel_aspect_x: 1.0,
            pixel_aspect_y: 1.0,
            sensor_fit: SensorFit::Auto,
        }
    }
}

impl SensorSettings {
    /// The rendered image size in pixels, after scaling.
    pub fn image_size(&self) -> (f64, f64) {
        let scale = self.resolution_percentage / 100.0;
        (
            self.resolution_x as f64 * scale,
            self.resolution_y as f64 * scale,
        )
    }

    /// The pinhole intrinsic matrix of the settings.
    ///
    /// The principal point is the image center and the skew is zero.
    ///
    /// # Errors
    ///
    /// [`TransformError::SingularIntrinsics`] if a dimension or the pixel aspect is zero.
    pub fn intrinsic_matrix(&self) -> Result<IntrinsicMatrix, TransformError> {
        let (width, height) = self.image_size();
        let aspect_ratio = self.pixel_aspect_x / self.pixel_aspect_y;

        let (s_u, s_v) = match self.sensor_fit {
            SensorFit::Vertical => (
                width / self.sensor_width_mm / aspect_ratio,
                height / self.sensor_height_mm,
            ),
            SensorFit::Auto | SensorFit::Horizontal => (
                width / self.sensor_width_mm,
                height * aspect_ratio / self.sensor_height_mm,
            ),
        };

        IntrinsicMatrix::new(
            self.focal_length_mm * s_u,
            self.focal_length_mm * s_v,
            0.0,
            width / 2.0,
            height / 2.0,
        )
    }
}
