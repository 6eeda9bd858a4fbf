//! High-level facade crate for the `motion-markers-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core, scanner and track crates,
//! - [`TrackerConfig`] (JSON) and [`ExtractionReport`],
//! - [`TrackingPipeline`], which owns the track store across a frame sequence,
//! - (feature `image`) [`extract`]: frame discovery on disk, decoding and the
//!   end-to-end folder -> CSV run.
//!
//! ## Quickstart
//!
//! ```no_run
//! use motion_markers::{extract, TrackerConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TrackerConfig::default();
//! let run = extract::run_extraction("renders/", &config)?;
//! let written = run.export(".", &config)?;
//! println!("{} tracks written", written.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `motion_markers::core`: RGBA frames, pixel classification, logging.
//! - `motion_markers::scan`: corner search, centroid estimation, frame scanner.
//! - `motion_markers::tracks`: coordinate mapping, timecodes, track store, CSV.
//! - `motion_markers::extract` (feature `image`): directory-level helpers.

pub use motion_markers_core as core;
pub use motion_markers_scan as scan;
pub use motion_markers_tracks as tracks;

pub use motion_markers_core::{Rgba, RgbaFrame, RgbaFrameView};
pub use motion_markers_scan::{Detection, FrameScanSummary, FrameScanner, MissingCorePolicy, ScanParams};
pub use motion_markers_tracks::{
    CoordinateMapper, CsvFormat, MotionRecord, ObjectIdentity, TrackStore, VerticalOrigin,
};

mod io;
mod pipeline;

pub use io::{ConfigIoError, ExtractionReport, TrackReport, TrackerConfig};
pub use pipeline::{PipelineError, TrackingPipeline};

#[cfg(feature = "image")]
pub mod extract;
