//! JSON configuration and report helpers for track extraction.

use std::{fs, path::Path};

use motion_markers_scan::{FrameScanSummary, FrameScanner, ScanParams, ScanParamsError};
use motion_markers_tracks::{
    csv_file_name, CoordinateMapper, CsvFormat, MapperError, ObjectIdentity, TrackStore,
    VerticalOrigin,
};
use serde::{Deserialize, Serialize};

#[derive(thiserror::Error, Debug)]
pub enum ConfigIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn default_fps() -> u32 {
    30
}

fn default_pixels_per_meter() -> f64 {
    100.0
}

/// Everything a run needs besides the input and output locations.
///
/// Serialized flat, e.g.
/// `{"fps": 30, "pixels_per_meter": 100.0, "vertical_origin": "bottom",
///   "patch_size": 4, "missing_core": "zero_color", "precision": null}`.
/// Missing fields take their defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default = "default_fps")]
    pub fps: u32,
    #[serde(default = "default_pixels_per_meter")]
    pub pixels_per_meter: f64,
    #[serde(default)]
    pub vertical_origin: VerticalOrigin,
    #[serde(flatten)]
    pub scan: ScanParams,
    #[serde(flatten)]
    pub csv: CsvFormat,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            fps: default_fps(),
            pixels_per_meter: default_pixels_per_meter(),
            vertical_origin: VerticalOrigin::default(),
            scan: ScanParams::default(),
            csv: CsvFormat::default(),
        }
    }
}

impl TrackerConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn build_mapper(&self) -> Result<CoordinateMapper, MapperError> {
        CoordinateMapper::new(self.pixels_per_meter, self.vertical_origin, self.fps)
    }

    pub fn build_scanner(&self) -> Result<FrameScanner, ScanParamsError> {
        FrameScanner::new(self.scan)
    }
}

/// Per-track line of an [`ExtractionReport`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackReport {
    pub identity: ObjectIdentity,
    pub records: usize,
    pub first_time: Option<String>,
    pub last_time: Option<String>,
    #[serde(default)]
    pub csv_path: Option<String>,
}

/// Summary of one extraction run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub input_folder: String,
    pub config: TrackerConfig,
    pub frames_scanned: usize,
    pub first_frame: Option<u64>,
    pub last_frame: Option<u64>,
    pub detections: usize,
    pub skipped_missing_core: usize,
    pub tracks: Vec<TrackReport>,
}

impl ExtractionReport {
    /// Build a report from the finished track store and per-frame counters.
    pub fn new(
        input_folder: &Path,
        config: &TrackerConfig,
        summaries: &[FrameScanSummary],
        store: &TrackStore,
    ) -> Self {
        let tracks = store
            .iter()
            .map(|(identity, records)| TrackReport {
                identity: identity.clone(),
                records: records.len(),
                first_time: records.first().map(|r| r.time.clone()),
                last_time: records.last().map(|r| r.time.clone()),
                csv_path: None,
            })
            .collect();

        Self {
            input_folder: input_folder.to_string_lossy().into_owned(),
            config: config.clone(),
            frames_scanned: summaries.len(),
            first_frame: summaries.first().map(|s| s.frame_index),
            last_frame: summaries.last().map(|s| s.frame_index),
            detections: summaries.iter().map(|s| s.registered).sum(),
            skipped_missing_core: summaries.iter().map(|s| s.skipped_missing_core).sum(),
            tracks,
        }
    }

    /// Attach written CSV paths to the matching tracks (`out_<identity>.csv`).
    pub fn set_csv_paths<P: AsRef<Path>>(&mut self, paths: &[P]) {
        for track in &mut self.tracks {
            let name = csv_file_name(&track.identity);
            track.csv_path = paths
                .iter()
                .map(AsRef::as_ref)
                .find(|p| p.file_name().is_some_and(|f| f == name.as_str()))
                .map(|p| p.to_string_lossy().into_owned());
        }
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
