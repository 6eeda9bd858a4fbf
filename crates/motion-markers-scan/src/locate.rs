use motion_markers_core::{is_empty_pixel, RgbaFrameView};
use serde::{Deserialize, Serialize};

/// Top-left pixel of a marker patch.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PatchCorner {
    pub x: usize,
    pub y: usize,
}

#[inline]
fn occupied(frame: &RgbaFrameView<'_>, x: usize, y: usize) -> bool {
    frame.get(x, y).is_some_and(|px| !is_empty_pixel(px))
}

/// Find the top-left corner of the patch that contains the grid hit
/// `(grid_x, grid_y)`.
///
/// The grid walk only samples every `patch_size` pixels, so a hit can land
/// anywhere inside a marker. Walk up the hit column while the pixel above is
/// occupied, at most `patch_size - 1` steps, then left along the row reached
/// the same way. The walk stops at the frame edge; it never wraps.
pub fn locate_corner(
    frame: &RgbaFrameView<'_>,
    grid_x: usize,
    grid_y: usize,
    patch_size: usize,
) -> PatchCorner {
    let max_steps = patch_size.saturating_sub(1);

    let mut y = grid_y;
    for _ in 0..max_steps {
        match y.checked_sub(1) {
            Some(up) if occupied(frame, grid_x, up) => y = up,
            _ => break,
        }
    }

    let mut x = grid_x;
    for _ in 0..max_steps {
        match x.checked_sub(1) {
            Some(left) if occupied(frame, left, y) => x = left,
            _ => break,
        }
    }

    PatchCorner { x, y }
}
