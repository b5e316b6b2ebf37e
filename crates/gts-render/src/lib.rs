#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Sequential dataset generation.
pub mod pipeline;

/// Camera placement in the renderer's axis convention.
pub mod placement;

/// The rendering backend contract.
pub mod renderer;

/// Intrinsic matrix from physical sensor settings.
pub mod sensor;

pub use pipeline::{load_inputs, render_image, DatasetGenerator, DatasetSummary, PipelineError};
pub use placement::{renderer_placement, CameraPlacement};
pub use renderer::Renderer;
pub use sensor::{SensorFit, SensorSettings};
