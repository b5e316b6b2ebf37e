use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Identifies one data collection run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceIdentity {
    /// A description of the type of run, e.g. `regular`.
    pub sequence_type: String,
    /// A number unique to the date and sequence type.
    pub sequence_number: u32,
    /// The texture mapped onto the ground.
    pub texture_number: u32,
    /// The name of the camera in the renderer.
    pub camera_name: String,
}

/// Derives the names of image files, folders, and list files of a run.
///
/// All names are pure functions of the output folder, the sequence identity and the date of the
/// run. No file system access is performed.
#[derive(Debug, Clone)]
pub struct NameConfigurator {
    output_folder: PathBuf,
    identity: SequenceIdentity,
    date: NaiveDate,
    base_name: String,
}

impl NameConfigurator {
    /// Create a new name configurator.
    ///
    /// # Arguments
    ///
    /// * `output_folder` - The root folder under which all data resides.
    /// * `identity` - The identity of the run.
    /// * `date` - The date the data is collected.
    pub fn new(output_folder: impl Into<PathBuf>, identity: SequenceIdentity, date: NaiveDate) -> Self {
        let base_name = format!("{}_{}", identity.sequence_type, date.format("%y%m%d"));
        Self {
            output_folder: output_folder.into(),
            identity,
            date,
            base_name,
        }
    }

    /// The root folder under which all data resides.
    pub fn output_folder(&self) -> &Path {
        &self.output_folder
    }

    /// The identity of the run.
    pub fn identity(&self) -> &SequenceIdentity {
        &self.identity
    }

    /// The date the data is collected.
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The folder holding the images, relative to the output folder.
    ///
    /// `<sequence_type>/<YYMMDD>/seq<NNNN>`
    pub fn image_directory(&self) -> PathBuf {
        Path::new(&self.identity.sequence_type)
            .join(self.date.format("%y%m%d").to_string())
            .join(format!("seq{:04}", self.identity.sequence_number))
    }

    /// The file name of the image at `index`.
    ///
    /// `HDG2_t<TTT>_<sequence_type>_<YYYY-MM-DD>_s<NNNN>_<camera_name>_i<IIIIIII>.png`
    pub fn image_file_name(&self, index: usize) -> String {
        format!(
            "HDG2_t{:03}_{}_{}_s{:04}_{}_i{:07}.png",
            self.identity.texture_number,
            self.identity.sequence_type,
            self.date.format("%Y-%m-%d"),
            self.identity.sequence_number,
            self.identity.camera_name,
            index
        )
    }

    /// The path of the image at `index`, relative to the output folder.
    pub fn relative_image_path(&self, index: usize) -> PathBuf {
        self.image_directory().join(self.image_file_name(index))
    }

    /// The path of the image at `index`, joined to the output folder.
    pub fn image_path(&self, index: usize) -> PathBuf {
        self.output_folder.join(self.relative_image_path(index))
    }

    /// The name shared by the three list files, `<sequence_type>_<YYMMDD>`.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// The list file holding only image paths.
    pub fn test_file(&self) -> PathBuf {
        self.output_folder.join(format!("{}.test", self.base_name))
    }

    /// The list file alternating image paths and image corner poses in pixels.
    pub fn txt_file(&self) -> PathBuf {
        self.output_folder.join(format!("{}.txt", self.base_name))
    }

    /// The list file alternating image paths and robot poses in meters.
    pub fn meters_txt_file(&self) -> PathBuf {
        self.output_folder
            .join(format!("{}_meters.txt", self.base_name))
    }
}
