use crate::pixel::Rgba;

/// Interleaved channels per pixel (R, G, B, A).
pub const CHANNELS: usize = 4;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("invalid RGBA buffer length (expected {expected} bytes, got {got})")]
    InvalidBufferLength { expected: usize, got: usize },

    #[error("invalid RGBA frame dimensions (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },
}

fn expected_len(width: usize, height: usize) -> Result<usize, FrameError> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or(FrameError::InvalidDimensions { width, height })
}

#[derive(Clone, Copy, Debug)]
pub struct RgbaFrameView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major, len = w*h*4
}

impl<'a> RgbaFrameView<'a> {
    /// Wrap a raw interleaved RGBA buffer, checking its length.
    pub fn new(width: usize, height: usize, data: &'a [u8]) -> Result<Self, FrameError> {
        let expected = expected_len(width, height)?;
        if data.len() != expected {
            return Err(FrameError::InvalidBufferLength {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y * self.width + x) * CHANNELS;
        let px = self.data.get(i..i + CHANNELS)?;
        Some(Rgba::new(px[0], px[1], px[2], px[3]))
    }

    /// Pixel at signed coordinates; anything outside the frame reads as
    /// [`Rgba::TRANSPARENT`].
    #[inline]
    pub fn get_or_transparent(&self, x: i64, y: i64) -> Rgba {
        if x < 0 || y < 0 {
            return Rgba::TRANSPARENT;
        }
        self.get(x as usize, y as usize)
            .unwrap_or(Rgba::TRANSPARENT)
    }
}

/// Owned RGBA frame, mostly useful for building synthetic inputs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbaFrame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbaFrame {
    /// Fully transparent frame.
    pub fn transparent(width: usize, height: usize) -> Result<Self, FrameError> {
        let len = expected_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self, FrameError> {
        RgbaFrameView::new(width, height, &data)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn view(&self) -> RgbaFrameView<'_> {
        RgbaFrameView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }

    /// Overwrite one pixel. Writes outside the frame are ignored.
    pub fn put(&mut self, x: usize, y: usize, px: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = (y * self.width + x) * CHANNELS;
        self.data[i..i + CHANNELS].copy_from_slice(&[px.r, px.g, px.b, px.a]);
    }

    /// Fill the axis-aligned block `[x0, x0 + w) x [y0, y0 + h)`, clipped to the frame.
    pub fn fill_rect(&mut self, x0: usize, y0: usize, w: usize, h: usize, px: Rgba) {
        for y in y0..y0.saturating_add(h).min(self.height) {
            for x in x0..x0.saturating_add(w).min(self.width) {
                self.put(x, y, px);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_short_buffer() {
        let data = [0u8; 15];
        let err = RgbaFrameView::new(2, 2, &data).unwrap_err();
        assert_eq!(
            err,
            FrameError::InvalidBufferLength {
                expected: 16,
                got: 15
            }
        );
    }

    #[test]
    fn rejects_overflowing_dimensions() {
        let err = RgbaFrame::transparent(usize::MAX, 2).unwrap_err();
        assert!(matches!(err, FrameError::InvalidDimensions { .. }));
    }

    #[test]
    fn reads_row_major_pixels() {
        let mut frame = RgbaFrame::transparent(3, 2).expect("frame");
        frame.put(2, 1, Rgba::new(1, 2, 3, 4));
        let view = frame.view();
        assert_eq!(view.get(2, 1), Some(Rgba::new(1, 2, 3, 4)));
        assert_eq!(&frame.data[20..24], &[1, 2, 3, 4]);
        assert_eq!(view.get(3, 0), None);
    }

    #[test]
    fn out_of_bounds_reads_are_transparent() {
        let mut frame = RgbaFrame::transparent(2, 2).expect("frame");
        frame.fill_rect(0, 0, 2, 2, Rgba::new(9, 9, 9, 255));
        let view = frame.view();
        assert_eq!(view.get_or_transparent(-1, 0), Rgba::TRANSPARENT);
        assert_eq!(view.get_or_transparent(0, -1), Rgba::TRANSPARENT);
        assert_eq!(view.get_or_transparent(2, 0), Rgba::TRANSPARENT);
        assert_eq!(view.get_or_transparent(1, 1), Rgba::new(9, 9, 9, 255));
    }

    #[test]
    fn fill_rect_clips_to_frame() {
        let mut frame = RgbaFrame::transparent(4, 4).expect("frame");
        frame.fill_rect(3, 3, 5, 5, Rgba::new(1, 1, 1, 255));
        let view = frame.view();
        assert_eq!(view.get(3, 3), Some(Rgba::new(1, 1, 1, 255)));
        assert_eq!(view.get(2, 3), Some(Rgba::TRANSPARENT));
    }
}
