//! Folder-level extraction: list frames, decode them, scan, export CSV.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageError, ImageReader, RgbaImage};
use motion_markers_core::RgbaFrameView;
use motion_markers_scan::FrameScanSummary;
use motion_markers_tracks::{ExportError, TrackStore};

use crate::io::{ExtractionReport, TrackerConfig};
use crate::pipeline::{PipelineError, TrackingPipeline};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// File suffixes treated as frames. Matching is case-sensitive.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Errors produced while extracting tracks from a frame folder.
#[derive(thiserror::Error, Debug)]
pub enum ExtractError {
    #[error("input folder {0} does not exist")]
    MissingInputFolder(PathBuf),

    #[error("cannot parse a frame index from file name {file:?} (expected e.g. name.0042.png)")]
    InvalidFrameIndex { file: String },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// One frame file of the input sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameFile {
    pub path: PathBuf,
    pub file_name: String,
    pub frame_index: u64,
}

/// Frame index encoded in a file name: the `.`-separated token right
/// before the extension, e.g. `render.0042.png` -> 42.
pub fn parse_frame_index(file_name: &str) -> Option<u64> {
    let mut tokens = file_name.rsplit('.');
    tokens.next()?;
    tokens.next()?.parse().ok()
}

fn is_frame_file(file_name: &str) -> bool {
    ACCEPTED_EXTENSIONS
        .iter()
        .any(|ext| file_name.ends_with(ext))
}

/// List the frame files of `folder` in lexicographic file-name order.
///
/// Entries with other extensions are ignored. A frame file whose index
/// token does not parse fails the whole listing.
pub fn discover_frames(folder: impl AsRef<Path>) -> Result<Vec<FrameFile>, ExtractError> {
    let folder = folder.as_ref();
    if !folder.exists() {
        return Err(ExtractError::MissingInputFolder(folder.to_path_buf()));
    }

    let io_err = |source| ExtractError::Io {
        path: folder.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(folder).map_err(io_err)? {
        let entry = entry.map_err(io_err)?;
        if entry.file_type().map_err(io_err)?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if is_frame_file(&name) => names.push(name),
            Ok(_) => {}
            Err(raw) => log::warn!("skipping non UTF-8 file name {raw:?}"),
        }
    }
    names.sort();

    let mut frames = Vec::with_capacity(names.len());
    for file_name in names {
        let Some(frame_index) = parse_frame_index(&file_name) else {
            return Err(ExtractError::InvalidFrameIndex { file: file_name });
        };
        frames.push(FrameFile {
            path: folder.join(&file_name),
            file_name,
            frame_index,
        });
    }

    if frames.windows(2).any(|w| w[1].frame_index <= w[0].frame_index) {
        log::warn!(
            "frame indices in {} are not increasing in file-name order; zero-pad the numbers",
            folder.display()
        );
    }

    Ok(frames)
}

/// Decode an image file into 8-bit RGBA. Images without alpha come out
/// fully opaque.
pub fn load_frame(path: impl AsRef<Path>) -> Result<RgbaImage, ExtractError> {
    let path = path.as_ref();
    let reader = ImageReader::open(path)
        .and_then(|r| r.with_guessed_format())
        .map_err(|source| ExtractError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let img = reader.decode().map_err(|source| ExtractError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgba8())
}

/// Convert an `image::RgbaImage` into the lightweight core view type.
pub fn rgba_view(img: &RgbaImage) -> RgbaFrameView<'_> {
    RgbaFrameView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Result of scanning a whole folder.
#[derive(Debug)]
pub struct Extraction {
    pub input_folder: PathBuf,
    pub frames: Vec<FrameFile>,
    pub summaries: Vec<FrameScanSummary>,
    pub store: TrackStore,
}

impl Extraction {
    /// Write `out_<identity>.csv` for every track into `out_dir`.
    pub fn export(
        &self,
        out_dir: impl AsRef<Path>,
        config: &TrackerConfig,
    ) -> Result<Vec<PathBuf>, ExtractError> {
        Ok(self.store.write_csv_dir(out_dir, &config.csv)?)
    }

    pub fn report(&self, config: &TrackerConfig) -> ExtractionReport {
        ExtractionReport::new(&self.input_folder, config, &self.summaries, &self.store)
    }
}

/// Scan every frame of `folder` in file-name order into one track store.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(folder, config), fields(folder = %folder.as_ref().display()))
)]
pub fn run_extraction(
    folder: impl AsRef<Path>,
    config: &TrackerConfig,
) -> Result<Extraction, ExtractError> {
    let folder = folder.as_ref();
    let mut pipeline = TrackingPipeline::new(config)?;
    let frames = discover_frames(folder)?;
    log::info!("{} frames in {}", frames.len(), folder.display());

    for frame in &frames {
        let img = load_frame(&frame.path)?;
        pipeline.push_frame(&rgba_view(&img), frame.frame_index);
    }

    let (store, summaries) = pipeline.finish();
    log::info!(
        "{} tracks, {} records from {} frames",
        store.len(),
        store.total_records(),
        summaries.len()
    );

    Ok(Extraction {
        input_folder: folder.to_path_buf(),
        frames,
        summaries,
        store,
    })
}
