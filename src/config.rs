use serde::{Deserialize, Serialize};

use crate::error::RemoverError;

pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;
pub const DEFAULT_THUMBNAIL_WIDTH: f64 = 180.0;
pub const DEFAULT_OUTPUT_SUFFIX: &str = "-modified";

/// Progress percentages reported while exporting.
///
/// Copying pages moves linearly from `copy_floor` to `copy_ceiling`;
/// completion is always reported as 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportProgress {
    pub opening: f64,
    pub copy_floor: f64,
    pub copy_ceiling: f64,
}

impl Default for ExportProgress {
    fn default() -> Self {
        Self {
            opening: 10.0,
            copy_floor: 30.0,
            copy_ceiling: 90.0,
        }
    }
}

impl ExportProgress {
    /// Percentage after `copied` of `total` pages have been copied.
    pub fn copying(&self, copied: usize, total: usize) -> f64 {
        if total == 0 {
            return self.copy_ceiling;
        }
        self.copy_floor + (self.copy_ceiling - self.copy_floor) * copied as f64 / total as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoverConfig {
    pub max_file_size: u64,
    pub accepted_mime_types: Vec<String>,
    /// Rendered width of every thumbnail, in layout units.
    pub thumbnail_width: f64,
    pub output_suffix: String,
    pub export_progress: ExportProgress,
}

impl Default for RemoverConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            accepted_mime_types: vec!["application/pdf".to_string(), "application/x-pdf".to_string()],
            thumbnail_width: DEFAULT_THUMBNAIL_WIDTH,
            output_suffix: DEFAULT_OUTPUT_SUFFIX.to_string(),
            export_progress: ExportProgress::default(),
        }
    }
}

impl RemoverConfig {
    pub fn validate(&self) -> Result<(), RemoverError> {
        if self.max_file_size == 0 {
            return Err(RemoverError::InvalidConfig("maxFileSize must be positive".into()));
        }
        if self.accepted_mime_types.is_empty() {
            return Err(RemoverError::InvalidConfig(
                "acceptedMimeTypes must not be empty".into(),
            ));
        }
        if !(self.thumbnail_width.is_finite() && self.thumbnail_width > 0.0) {
            return Err(RemoverError::InvalidConfig(format!(
                "thumbnailWidth must be positive, got {}",
                self.thumbnail_width
            )));
        }

        let bands = &self.export_progress;
        let ordered = 0.0 <= bands.opening
            && bands.opening <= bands.copy_floor
            && bands.copy_floor <= bands.copy_ceiling
            && bands.copy_ceiling <= 100.0;
        if !ordered {
            return Err(RemoverError::InvalidConfig(format!(
                "exportProgress must increase within 0..=100, got {}/{}/{}",
                bands.opening, bands.copy_floor, bands.copy_ceiling
            )));
        }

        Ok(())
    }
}
