//! Color-coded marker detection on RGBA frames.
//!
//! Design idea:
//! - Walk the frame on a coarse grid whose step equals the patch size.
//! - A non-empty grid hit seeds a detection; walk backward to the true
//!   top-left corner of the marker's patch.
//! - Estimate the alpha-weighted centroid of that patch and take the marker
//!   color from its fully opaque core pixel.
//! - Claim the patch in a per-frame footprint mask so later grid hits on the
//!   same marker are skipped.
//!
//! Markers must render no larger than one patch. Bigger blobs are still
//! reported, but their centroid and corner are not meaningful. A marker is
//! only seen if a grid point lands on it, so markers narrower than a patch
//! can fall between grid points; render them at exactly patch size.

mod centroid;
mod footprint;
mod locate;
mod params;
mod scanner;

pub use centroid::{estimate_centroid, Detection, PatchView};
pub use footprint::FootprintMask;
pub use locate::{locate_corner, PatchCorner};
pub use params::{MissingCorePolicy, ScanParams, ScanParamsError, DEFAULT_PATCH_SIZE};
pub use scanner::{FrameScanSummary, FrameScanner};
