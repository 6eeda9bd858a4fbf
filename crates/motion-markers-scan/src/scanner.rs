use motion_markers_core::{is_empty_pixel, RgbaFrameView};
use motion_markers_tracks::{CoordinateMapper, ObjectIdentity, TrackStore};
use serde::{Deserialize, Serialize};

use crate::centroid::{estimate_centroid, Detection, PatchView};
use crate::footprint::FootprintMask;
use crate::locate::locate_corner;
use crate::params::{MissingCorePolicy, ScanParams, ScanParamsError};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Counters for one scanned frame.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FrameScanSummary {
    pub frame_index: u64,
    /// Detections registered in the track store.
    pub registered: usize,
    /// Detections dropped by [`MissingCorePolicy::Skip`].
    pub skipped_missing_core: usize,
}

/// Patch-grid marker scanner.
pub struct FrameScanner {
    params: ScanParams,
}

impl FrameScanner {
    pub fn new(params: ScanParams) -> Result<Self, ScanParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &ScanParams {
        &self.params
    }

    /// All markers of one frame in grid-walk (row-major) order.
    ///
    /// No two returned detections share a patch: each one claims its patch,
    /// plus one pixel of margin on the right and bottom, in a footprint mask
    /// that later grid hits are checked against.
    pub fn detect(&self, frame: &RgbaFrameView<'_>) -> Vec<Detection> {
        let step = self.params.patch_size;
        let mut footprint = FootprintMask::new(frame.width, frame.height);
        let mut out = Vec::new();

        for y in (0..frame.height).step_by(step) {
            for x in (0..frame.width).step_by(step) {
                if footprint.is_claimed(x, y) {
                    continue;
                }
                let Some(px) = frame.get(x, y) else {
                    continue;
                };
                if is_empty_pixel(px) {
                    continue;
                }

                let corner = locate_corner(frame, x, y, step);
                footprint.claim(corner.x, corner.y, corner.x + step, corner.y + step);

                match estimate_centroid(&PatchView::new(*frame, corner, step)) {
                    Some(det) => out.push(det),
                    None => log::debug!("zero-weight patch at ({}, {})", corner.x, corner.y),
                }
            }
        }

        out
    }

    /// Detect markers in one frame and append their metric positions to
    /// `store`, keyed by marker color.
    #[cfg_attr(
        feature = "tracing",
        instrument(
            level = "debug",
            skip(self, frame, mapper, store),
            fields(width = frame.width, height = frame.height)
        )
    )]
    pub fn scan_frame(
        &self,
        frame: &RgbaFrameView<'_>,
        frame_index: u64,
        mapper: &CoordinateMapper,
        store: &mut TrackStore,
    ) -> FrameScanSummary {
        let mut summary = FrameScanSummary {
            frame_index,
            ..FrameScanSummary::default()
        };
        let detections = self.detect(frame);
        if detections.is_empty() {
            return summary;
        }

        let time = mapper.timecode(frame_index);
        for det in detections {
            if det.core_color.is_none() && self.params.missing_core == MissingCorePolicy::Skip {
                log::debug!(
                    "frame {frame_index}: no opaque core near ({:.2}, {:.2}), skipped",
                    det.center.x,
                    det.center.y
                );
                summary.skipped_missing_core += 1;
                continue;
            }
            let meters = mapper.to_meters(det.center, frame.width, frame.height);
            store.register(
                ObjectIdentity::from_color(det.color()),
                time.clone(),
                meters.x,
                meters.y,
            );
            summary.registered += 1;
        }

        summary
    }
}
