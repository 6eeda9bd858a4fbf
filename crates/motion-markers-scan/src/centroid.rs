use motion_markers_core::{Rgba, RgbaFrameView};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::locate::PatchCorner;

/// Fixed-size square window into a frame.
///
/// Cells that fall outside the frame read as fully transparent, so a patch
/// anchored near the right or bottom edge is still `size x size`.
#[derive(Clone, Copy, Debug)]
pub struct PatchView<'a> {
    pub frame: RgbaFrameView<'a>,
    pub corner: PatchCorner,
    pub size: usize,
}

impl<'a> PatchView<'a> {
    pub fn new(frame: RgbaFrameView<'a>, corner: PatchCorner, size: usize) -> Self {
        Self {
            frame,
            corner,
            size,
        }
    }

    /// Pixel at patch-local coordinates.
    #[inline]
    pub fn pixel(&self, lx: usize, ly: usize) -> Rgba {
        self.frame
            .get(self.corner.x + lx, self.corner.y + ly)
            .unwrap_or(Rgba::TRANSPARENT)
    }
}

/// One marker found in a frame, in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Top-left corner of the patch the centroid was estimated on.
    pub corner: PatchCorner,
    /// Alpha-weighted centroid in frame pixels (not rounded).
    pub center: Point2<f64>,
    /// Last fully opaque pixel of the patch in row-major order.
    pub core_color: Option<Rgba>,
}

impl Detection {
    /// Centroid relative to the patch corner.
    pub fn local_center(&self) -> Point2<f64> {
        Point2::new(
            self.center.x - self.corner.x as f64,
            self.center.y - self.corner.y as f64,
        )
    }

    /// Marker color; all-zero when the patch has no opaque core.
    pub fn color(&self) -> Rgba {
        self.core_color.unwrap_or(Rgba::TRANSPARENT)
    }
}

/// Alpha-weighted centroid and core color of one patch.
///
/// Each pixel weighs `alpha / 255`, including opaque white ones. Returns
/// `None` when the patch carries no alpha at all.
pub fn estimate_centroid(patch: &PatchView<'_>) -> Option<Detection> {
    let mut sum = Vector2::<f64>::zeros();
    let mut total = 0.0f64;
    let mut core_color = None;

    for ly in 0..patch.size {
        for lx in 0..patch.size {
            let px = patch.pixel(lx, ly);
            let w = px.weight();
            sum += Vector2::new(lx as f64, ly as f64) * w;
            total += w;
            if px.is_opaque() {
                core_color = Some(px);
            }
        }
    }

    if total <= 0.0 {
        return None;
    }

    let local = sum / total;
    Some(Detection {
        corner: patch.corner,
        center: Point2::new(
            local.x + patch.corner.x as f64,
            local.y + patch.corner.y as f64,
        ),
        core_color,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use motion_markers_core::RgbaFrame;

    fn patch_at(frame: &RgbaFrame, x: usize, y: usize, size: usize) -> PatchView<'_> {
        PatchView::new(frame.view(), PatchCorner { x, y }, size)
    }

    #[test]
    fn uniform_block_centroid_is_block_center() {
        let mut frame = RgbaFrame::transparent(10, 10).expect("frame");
        frame.fill_rect(3, 2, 2, 2, Rgba::new(0, 128, 255, 255));
        let det = estimate_centroid(&patch_at(&frame, 3, 2, 4)).expect("detection");
        assert_abs_diff_eq!(det.center.x, 3.5, epsilon = 1e-12);
        assert_abs_diff_eq!(det.center.y, 2.5, epsilon = 1e-12);
        assert_eq!(det.color(), Rgba::new(0, 128, 255, 255));
    }

    #[test]
    fn anti_aliased_edge_pulls_centroid_sub_pixel() {
        let mut frame = RgbaFrame::transparent(8, 8).expect("frame");
        frame.put(0, 0, Rgba::new(10, 20, 30, 255));
        frame.put(1, 0, Rgba::new(10, 20, 30, 85));
        let det = estimate_centroid(&patch_at(&frame, 0, 0, 4)).expect("detection");
        // weights 1 and 1/3 -> x = (1/3) / (4/3) = 0.25
        assert_abs_diff_eq!(det.center.x, 0.25, epsilon = 1e-12);
        assert_abs_diff_eq!(det.center.y, 0.0, epsilon = 1e-12);
        assert_eq!(det.color(), Rgba::new(10, 20, 30, 255));
    }

    #[test]
    fn last_opaque_pixel_wins() {
        let mut frame = RgbaFrame::transparent(4, 4).expect("frame");
        frame.put(0, 0, Rgba::new(1, 1, 1, 255));
        frame.put(3, 3, Rgba::new(2, 2, 2, 255));
        frame.put(2, 3, Rgba::new(3, 3, 3, 200));
        let det = estimate_centroid(&patch_at(&frame, 0, 0, 4)).expect("detection");
        assert_eq!(det.core_color, Some(Rgba::new(2, 2, 2, 255)));
    }

    #[test]
    fn missing_core_defaults_to_zero_color() {
        let mut frame = RgbaFrame::transparent(4, 4).expect("frame");
        frame.fill_rect(1, 1, 2, 2, Rgba::new(200, 10, 10, 128));
        let det = estimate_centroid(&patch_at(&frame, 0, 0, 4)).expect("detection");
        assert_eq!(det.core_color, None);
        assert_eq!(det.color(), Rgba::TRANSPARENT);
    }

    #[test]
    fn zero_weight_patch_is_not_a_detection() {
        let frame = RgbaFrame::transparent(4, 4).expect("frame");
        assert!(estimate_centroid(&patch_at(&frame, 0, 0, 4)).is_none());
    }

    #[test]
    fn patch_past_frame_edge_reads_transparent() {
        let mut frame = RgbaFrame::transparent(5, 5).expect("frame");
        frame.put(4, 4, Rgba::new(9, 9, 9, 255));
        let det = estimate_centroid(&patch_at(&frame, 4, 4, 4)).expect("detection");
        assert_abs_diff_eq!(det.center.x, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(det.center.y, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn local_centroid_stays_inside_patch() {
        let size = 4;
        let mut frame = RgbaFrame::transparent(8, 8).expect("frame");
        for (i, a) in [1u8, 64, 255, 17, 200, 3, 99, 255].iter().enumerate() {
            frame.put(2 + i % size, 2 + i / 2, Rgba::new(i as u8, 0, 0, *a));
        }
        let det = estimate_centroid(&patch_at(&frame, 2, 2, size)).expect("detection");
        let local = det.local_center();
        assert!((0.0..size as f64).contains(&local.x), "{local:?}");
        assert!((0.0..size as f64).contains(&local.y), "{local:?}");
    }
}
