//! Motion tracks keyed by marker color.
//!
//! This crate turns pixel-space detections into time-stamped metric records:
//! - [`CoordinateMapper`] converts pixel centroids to meters and frame
//!   indices to `HH:MM:SS:FF` timecodes,
//! - [`ObjectIdentity`] derives a stable key from a marker's flat RGB color,
//! - [`TrackStore`] collects append-only records per identity and writes one
//!   CSV file per track.
//!
//! It knows nothing about how detections are found; see
//! `motion-markers-scan` for the frame scanner.

mod csv;
mod identity;
mod mapper;
mod store;
mod timecode;

pub use csv::{csv_file_name, write_track_csv, CsvFormat, ExportError, CSV_HEADER};
pub use identity::ObjectIdentity;
pub use mapper::{CoordinateMapper, MapperError, VerticalOrigin};
pub use store::{MotionRecord, TrackStore, RECORD_PLACEHOLDER_MEMO};
pub use timecode::{frame_to_timecode, Timecode};
