use std::fmt;

use motion_markers_core::Rgba;
use serde::{Deserialize, Serialize};

/// Persistent marker key: the flat RGB color as lowercase hex.
///
/// The value is `format!("{:x}", (r << 16) | (g << 8) | b)`, unpadded, so
/// pure blue is `"ff"` and black is `"0"`. Alpha never participates.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectIdentity(String);

impl ObjectIdentity {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_color(Rgba::new(r, g, b, 0))
    }

    pub fn from_color(color: Rgba) -> Self {
        Self(format!("{:x}", color.rgb24()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ObjectIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Rgba> for ObjectIdentity {
    fn from(color: Rgba) -> Self {
        Self::from_color(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_unpadded_lowercase() {
        assert_eq!(ObjectIdentity::from_rgb(255, 0, 0).as_str(), "ff0000");
        assert_eq!(ObjectIdentity::from_rgb(0, 0, 255).as_str(), "ff");
        assert_eq!(ObjectIdentity::from_rgb(0, 0x0a, 0xbc).as_str(), "abc");
        assert_eq!(ObjectIdentity::from_rgb(0, 0, 0).as_str(), "0");
    }

    #[test]
    fn alpha_does_not_change_identity() {
        let opaque = ObjectIdentity::from(Rgba::new(12, 200, 7, 255));
        let faint = ObjectIdentity::from(Rgba::new(12, 200, 7, 3));
        assert_eq!(opaque, faint);
        assert_ne!(opaque, ObjectIdentity::from(Rgba::new(12, 200, 8, 255)));
    }
}
