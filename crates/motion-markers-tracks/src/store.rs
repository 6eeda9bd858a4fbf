use std::collections::BTreeMap;

use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::identity::ObjectIdentity;

/// Value of the `misc` column; reserved for annotations.
pub const RECORD_PLACEHOLDER_MEMO: &str = "none";

/// One sighting of a marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionRecord {
    /// `HH:MM:SS:FF` timecode of the frame.
    pub time: String,
    /// Meters from the vertical center line.
    pub x: f64,
    /// Meters from the configured vertical origin.
    pub y: f64,
    pub memo: String,
}

impl MotionRecord {
    pub fn new(time: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            time: time.into(),
            x,
            y,
            memo: RECORD_PLACEHOLDER_MEMO.to_owned(),
        }
    }

    pub fn position(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }
}

/// Append-only motion records grouped by marker identity.
///
/// Records keep the order in which they were registered, so frames must be
/// scanned in ascending time for each track to be a monotonic series.
/// Identities iterate in lexicographic order of their hex key.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrackStore {
    tracks: BTreeMap<ObjectIdentity, Vec<MotionRecord>>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to `identity`'s track, creating the track on first use.
    pub fn register(&mut self, identity: ObjectIdentity, time: impl Into<String>, x: f64, y: f64) {
        self.push(identity, MotionRecord::new(time, x, y));
    }

    pub fn push(&mut self, identity: ObjectIdentity, record: MotionRecord) {
        self.tracks.entry(identity).or_default().push(record);
    }

    pub fn track(&self, identity: &ObjectIdentity) -> Option<&[MotionRecord]> {
        self.tracks.get(identity).map(Vec::as_slice)
    }

    pub fn identities(&self) -> impl Iterator<Item = &ObjectIdentity> {
        self.tracks.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectIdentity, &[MotionRecord])> {
        self.tracks.iter().map(|(id, records)| (id, records.as_slice()))
    }

    /// Number of distinct identities.
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Number of records across all tracks.
    pub fn total_records(&self) -> usize {
        self.tracks.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(hex: u32) -> ObjectIdentity {
        ObjectIdentity::from_rgb((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    #[test]
    fn register_creates_tracks_lazily() {
        let mut store = TrackStore::new();
        assert!(store.is_empty());
        assert!(store.track(&id(0xff0000)).is_none());

        store.register(id(0xff0000), "00:00:00:00", 0.5, 1.0);
        assert_eq!(store.len(), 1);
        let track = store.track(&id(0xff0000)).expect("track");
        assert_eq!(track.len(), 1);
        assert_eq!(track[0].memo, RECORD_PLACEHOLDER_MEMO);
    }

    #[test]
    fn records_keep_append_order_without_dedup() {
        let mut store = TrackStore::new();
        store.register(id(0x00ff00), "00:00:00:03", 2.0, 2.0);
        store.register(id(0x00ff00), "00:00:00:00", 1.0, 1.0);
        store.register(id(0x00ff00), "00:00:00:00", 1.0, 1.0);
        store.register(id(0x0000ff), "00:00:00:00", 9.0, 9.0);

        let times: Vec<&str> = store
            .track(&id(0x00ff00))
            .expect("track")
            .iter()
            .map(|r| r.time.as_str())
            .collect();
        assert_eq!(times, ["00:00:00:03", "00:00:00:00", "00:00:00:00"]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.total_records(), 4);
    }

    #[test]
    fn identities_iterate_in_key_order() {
        let mut store = TrackStore::new();
        store.register(id(0xff0000), "t", 0.0, 0.0);
        store.register(id(0x0000ff), "t", 0.0, 0.0);
        store.register(id(0x00ff00), "t", 0.0, 0.0);
        let keys: Vec<&str> = store.identities().map(ObjectIdentity::as_str).collect();
        assert_eq!(keys, ["ff", "ff00", "ff0000"]);
    }
}
