use serde::{Deserialize, Serialize};

/// Fully opaque alpha value.
pub const MAX_ALPHA: u8 = 255;

/// One 8-bit RGBA pixel.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// All-zero pixel, used for reads outside the frame.
    pub const TRANSPARENT: Rgba = Rgba {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_array(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    /// Alpha normalized to `[0, 1]`.
    #[inline]
    pub fn weight(self) -> f64 {
        f64::from(self.a) / f64::from(MAX_ALPHA)
    }

    #[inline]
    pub fn is_opaque(self) -> bool {
        self.a == MAX_ALPHA
    }

    /// Packed `0xRRGGBB` value; alpha is dropped.
    #[inline]
    pub fn rgb24(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }
}

/// Whether a pixel belongs to the background.
///
/// Fully transparent pixels are background, and so is pure white at any
/// alpha: anti-aliased edges against a white matte must not seed markers.
#[inline]
pub fn is_empty_pixel(px: Rgba) -> bool {
    px.a == 0 || (px.r == 255 && px.g == 255 && px.b == 255)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_pixels_are_empty() {
        assert!(is_empty_pixel(Rgba::new(10, 20, 30, 0)));
        assert!(is_empty_pixel(Rgba::TRANSPARENT));
    }

    #[test]
    fn white_is_empty_at_any_alpha() {
        assert!(is_empty_pixel(Rgba::new(255, 255, 255, 255)));
        assert!(is_empty_pixel(Rgba::new(255, 255, 255, 17)));
    }

    #[test]
    fn colored_pixels_are_occupied() {
        assert!(!is_empty_pixel(Rgba::new(255, 0, 0, 255)));
        assert!(!is_empty_pixel(Rgba::new(255, 255, 254, 1)));
        assert!(!is_empty_pixel(Rgba::new(0, 0, 0, 128)));
    }

    #[test]
    fn rgb24_ignores_alpha() {
        assert_eq!(Rgba::new(0x12, 0x34, 0x56, 0).rgb24(), 0x123456);
        assert_eq!(
            Rgba::new(1, 2, 3, 255).rgb24(),
            Rgba::new(1, 2, 3, 40).rgb24()
        );
    }
}
