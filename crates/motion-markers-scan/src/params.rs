use serde::{Deserialize, Serialize};

/// Side length of the square patch one marker is expected to fit in.
pub const DEFAULT_PATCH_SIZE: usize = 4;

/// What to do with a patch that has no fully opaque pixel.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingCorePolicy {
    /// Register the detection with the all-zero color (identity `"0"`).
    #[default]
    ZeroColor,
    /// Drop the detection.
    Skip,
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanParamsError {
    #[error("patch size must be at least 1")]
    ZeroPatchSize,
}

/// Frame scanner settings.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ScanParams {
    /// Grid step and patch side, in pixels.
    #[serde(default = "default_patch_size")]
    pub patch_size: usize,
    #[serde(default)]
    pub missing_core: MissingCorePolicy,
}

fn default_patch_size() -> usize {
    DEFAULT_PATCH_SIZE
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            patch_size: DEFAULT_PATCH_SIZE,
            missing_core: MissingCorePolicy::default(),
        }
    }
}

impl ScanParams {
    pub fn validate(&self) -> Result<(), ScanParamsError> {
        if self.patch_size == 0 {
            return Err(ScanParamsError::ZeroPatchSize);
        }
        Ok(())
    }
}
