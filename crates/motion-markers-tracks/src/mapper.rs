use std::num::NonZeroU32;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::timecode::frame_to_timecode;

const DEFAULT_FPS: NonZeroU32 = match NonZeroU32::new(30) {
    Some(fps) => fps,
    None => panic!("default fps is non-zero"),
};

/// Where the metric `y = 0` line sits in the frame.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalOrigin {
    /// `y` grows upward from the bottom edge.
    #[default]
    Bottom,
    /// `y` grows downward from the top edge, like pixel rows.
    Top,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum MapperError {
    #[error("pixels per meter must be finite and positive (got {0})")]
    NonPositivePixelsPerMeter(f64),
    #[error("frame rate must be non-zero")]
    ZeroFps,
}

/// Pixel-space to metric-space conversion plus frame timing.
///
/// `x` is measured from the vertical center line of the frame, `y` from
/// the edge selected by [`VerticalOrigin`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    pixels_per_meter: f64,
    origin: VerticalOrigin,
    fps: NonZeroU32,
}

impl CoordinateMapper {
    pub fn new(pixels_per_meter: f64, origin: VerticalOrigin, fps: u32) -> Result<Self, MapperError> {
        if !pixels_per_meter.is_finite() || pixels_per_meter <= 0.0 {
            return Err(MapperError::NonPositivePixelsPerMeter(pixels_per_meter));
        }
        let fps = NonZeroU32::new(fps).ok_or(MapperError::ZeroFps)?;
        Ok(Self {
            pixels_per_meter,
            origin,
            fps,
        })
    }

    pub fn pixels_per_meter(&self) -> f64 {
        self.pixels_per_meter
    }

    pub fn origin(&self) -> VerticalOrigin {
        self.origin
    }

    pub fn fps(&self) -> NonZeroU32 {
        self.fps
    }

    /// Convert a pixel-space point of a `width x height` frame to meters.
    pub fn to_meters(&self, pixel: Point2<f64>, width: usize, height: usize) -> Point2<f64> {
        let x = pixel.x - width as f64 / 2.0;
        let y = match self.origin {
            VerticalOrigin::Bottom => height as f64 - pixel.y,
            VerticalOrigin::Top => pixel.y,
        };
        Point2::new(x / self.pixels_per_meter, y / self.pixels_per_meter)
    }

    /// Inverse of [`Self::to_meters`].
    pub fn to_pixels(&self, meters: Point2<f64>, width: usize, height: usize) -> Point2<f64> {
        let x = meters.x * self.pixels_per_meter + width as f64 / 2.0;
        let y = meters.y * self.pixels_per_meter;
        let y = match self.origin {
            VerticalOrigin::Bottom => height as f64 - y,
            VerticalOrigin::Top => y,
        };
        Point2::new(x, y)
    }

    /// `HH:MM:SS:FF` timecode of a frame at this mapper's frame rate.
    pub fn timecode(&self, frame_index: u64) -> String {
        frame_to_timecode(frame_index, self.fps)
    }
}

impl Default for CoordinateMapper {
    fn default() -> Self {
        Self {
            pixels_per_meter: 100.0,
            origin: VerticalOrigin::Bottom,
            fps: DEFAULT_FPS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn defaults_match_render_setup() {
        let m = CoordinateMapper::default();
        assert_eq!(m.pixels_per_meter(), 100.0);
        assert_eq!(m.origin(), VerticalOrigin::Bottom);
        assert_eq!(m.fps().get(), 30);
    }

    #[test]
    fn center_pixel_maps_to_half_height_with_bottom_origin() {
        let m = CoordinateMapper::new(100.0, VerticalOrigin::Bottom, 30).expect("mapper");
        let (w, h) = (640, 480);
        let center = Point2::new(w as f64 / 2.0, h as f64 / 2.0);
        let meters = m.to_meters(center, w, h);
        assert_abs_diff_eq!(meters.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(meters.y, h as f64 / (2.0 * 100.0), epsilon = 1e-12);

        let back = m.to_pixels(meters, w, h);
        assert_abs_diff_eq!(back.x, center.x, epsilon = 1e-9);
        assert_abs_diff_eq!(back.y, center.y, epsilon = 1e-9);
    }

    #[test]
    fn top_origin_keeps_row_direction() {
        let m = CoordinateMapper::new(50.0, VerticalOrigin::Top, 24).expect("mapper");
        let meters = m.to_meters(Point2::new(10.0, 25.0), 100, 80);
        assert_abs_diff_eq!(meters.x, -0.8, epsilon = 1e-12);
        assert_abs_diff_eq!(meters.y, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn bottom_origin_flips_rows() {
        let m = CoordinateMapper::new(100.0, VerticalOrigin::Bottom, 30).expect("mapper");
        let meters = m.to_meters(Point2::new(250.5, 10.0), 200, 110);
        assert_abs_diff_eq!(meters.x, 1.505, epsilon = 1e-12);
        assert_abs_diff_eq!(meters.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn inverse_round_trips_off_center_points() {
        for origin in [VerticalOrigin::Bottom, VerticalOrigin::Top] {
            let m = CoordinateMapper::new(37.5, origin, 30).expect("mapper");
            let p = Point2::new(13.25, 401.75);
            let back = m.to_pixels(m.to_meters(p, 333, 500), 333, 500);
            assert_abs_diff_eq!(back.x, p.x, epsilon = 1e-9);
            assert_abs_diff_eq!(back.y, p.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn rejects_invalid_scale_and_rate() {
        assert_eq!(
            CoordinateMapper::new(0.0, VerticalOrigin::Top, 30),
            Err(MapperError::NonPositivePixelsPerMeter(0.0))
        );
        assert!(CoordinateMapper::new(f64::NAN, VerticalOrigin::Top, 30).is_err());
        assert_eq!(
            CoordinateMapper::new(100.0, VerticalOrigin::Top, 0),
            Err(MapperError::ZeroFps)
        );
    }

    #[test]
    fn timecode_uses_mapper_rate() {
        let m = CoordinateMapper::new(100.0, VerticalOrigin::Bottom, 30).expect("mapper");
        assert_eq!(m.timecode(91), "00:00:03:03");
    }
}
