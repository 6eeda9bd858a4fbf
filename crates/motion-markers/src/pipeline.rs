use motion_markers_core::RgbaFrameView;
use motion_markers_scan::{FrameScanSummary, FrameScanner, ScanParamsError};
use motion_markers_tracks::{CoordinateMapper, MapperError, TrackStore};

use crate::io::TrackerConfig;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Params(#[from] ScanParamsError),
    #[error(transparent)]
    Mapper(#[from] MapperError),
}

/// Owns the track store for the lifetime of one frame sequence.
///
/// Create it before the first frame, push frames in ascending time and
/// call [`TrackingPipeline::finish`] after the last one. Track order is
/// push order; nothing is re-sorted afterwards.
pub struct TrackingPipeline {
    scanner: FrameScanner,
    mapper: CoordinateMapper,
    store: TrackStore,
    summaries: Vec<FrameScanSummary>,
}

impl TrackingPipeline {
    pub fn new(config: &TrackerConfig) -> Result<Self, PipelineError> {
        Ok(Self {
            scanner: config.build_scanner()?,
            mapper: config.build_mapper()?,
            store: TrackStore::new(),
            summaries: Vec::new(),
        })
    }

    /// Scan one frame into the store.
    pub fn push_frame(&mut self, frame: &RgbaFrameView<'_>, frame_index: u64) -> FrameScanSummary {
        if let Some(prev) = self.summaries.last() {
            if frame_index <= prev.frame_index {
                log::warn!(
                    "frame {frame_index} arrives after frame {}; tracks will not be monotonic in time",
                    prev.frame_index
                );
            }
        }

        let summary = self
            .scanner
            .scan_frame(frame, frame_index, &self.mapper, &mut self.store);
        log::debug!(
            "frame {frame_index}: {} detections ({} skipped)",
            summary.registered,
            summary.skipped_missing_core
        );
        self.summaries.push(summary);
        summary
    }

    pub fn store(&self) -> &TrackStore {
        &self.store
    }

    pub fn summaries(&self) -> &[FrameScanSummary] {
        &self.summaries
    }

    /// Hand over the finished tracks and per-frame counters.
    pub fn finish(self) -> (TrackStore, Vec<FrameScanSummary>) {
        (self.store, self.summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion_markers_core::{Rgba, RgbaFrame};
    use motion_markers_tracks::ObjectIdentity;

    fn frame_with_marker(x: usize, y: usize, color: Rgba) -> RgbaFrame {
        let mut frame = RgbaFrame::transparent(64, 48).expect("frame");
        frame.fill_rect(x, y, 4, 4, color);
        frame
    }

    #[test]
    fn builds_track_across_frames_with_gaps() {
        let color = Rgba::new(0, 200, 100, 255);
        let mut pipeline = TrackingPipeline::new(&TrackerConfig::default()).expect("pipeline");
        for (i, frame_index) in [0u64, 1, 5].into_iter().enumerate() {
            let frame = frame_with_marker(8 + 4 * i, 16, color);
            pipeline.push_frame(&frame.view(), frame_index);
        }

        let (store, summaries) = pipeline.finish();
        assert_eq!(summaries.len(), 3);
        let track = store
            .track(&ObjectIdentity::from_color(color))
            .expect("track");
        let times: Vec<&str> = track.iter().map(|r| r.time.as_str()).collect();
        assert_eq!(times, ["00:00:00:00", "00:00:00:03", "00:00:00:16"]);
        assert!(track.windows(2).all(|w| w[1].x > w[0].x));
    }

    #[test]
    fn empty_frames_leave_store_untouched() {
        let mut pipeline = TrackingPipeline::new(&TrackerConfig::default()).expect("pipeline");
        let frame = RgbaFrame::transparent(16, 16).expect("frame");
        let summary = pipeline.push_frame(&frame.view(), 3);
        assert_eq!(summary.registered, 0);
        assert!(pipeline.store().is_empty());
        assert_eq!(pipeline.summaries().len(), 1);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = TrackerConfig {
            pixels_per_meter: -1.0,
            ..TrackerConfig::default()
        };
        assert!(matches!(
            TrackingPipeline::new(&config),
            Err(PipelineError::Mapper(MapperError::NonPositivePixelsPerMeter(_)))
        ));
    }
}
