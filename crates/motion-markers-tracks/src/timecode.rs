use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

const MS_PER_SECOND: u128 = 1000;
const MS_PER_MINUTE: u128 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u128 = 60 * MS_PER_MINUTE;

/// Elapsed time of a frame, truncated to 10 ms resolution.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Timecode {
    pub hours: u64,
    pub minutes: u8,
    pub seconds: u8,
    /// Hundredths of a second, `0..=99`.
    pub centis: u8,
}

impl Timecode {
    /// Timecode of `frame_index` at a constant frame rate.
    ///
    /// Every step truncates: the frame start is floored to whole
    /// milliseconds, and the sub-second part to whole hundredths.
    pub fn from_frame(frame_index: u64, fps: NonZeroU32) -> Self {
        let mut msec = u128::from(frame_index) * MS_PER_SECOND / u128::from(fps.get());
        let hours = msec / MS_PER_HOUR;
        msec %= MS_PER_HOUR;
        let minutes = msec / MS_PER_MINUTE;
        msec %= MS_PER_MINUTE;
        let seconds = msec / MS_PER_SECOND;
        msec %= MS_PER_SECOND;

        Self {
            hours: u64::try_from(hours).unwrap_or(u64::MAX),
            minutes: minutes as u8,
            seconds: seconds as u8,
            centis: (msec / 10) as u8,
        }
    }
}

impl fmt::Display for Timecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hours, self.minutes, self.seconds, self.centis
        )
    }
}

/// Format `frame_index` as `HH:MM:SS:FF`, with `FF` in hundredths of a second.
pub fn frame_to_timecode(frame_index: u64, fps: NonZeroU32) -> String {
    Timecode::from_frame(frame_index, fps).to_string()
}
