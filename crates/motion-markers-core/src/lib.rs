//! Core types for motion-marker extraction.
//!
//! This crate is intentionally small: an RGBA frame view over a raw
//! row-major buffer, the pixel type, the background/marker classifier and
//! logger setup. It does *not* depend on any image decoder.

mod frame;
mod logger;
mod pixel;

pub use frame::{FrameError, RgbaFrame, RgbaFrameView, CHANNELS};
pub use pixel::{is_empty_pixel, Rgba, MAX_ALPHA};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
