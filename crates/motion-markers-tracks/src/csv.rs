//! One CSV file per track.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::identity::ObjectIdentity;
use crate::store::{MotionRecord, TrackStore};

#[cfg(feature = "tracing")]
use tracing::instrument;

pub const CSV_HEADER: [&str; 4] = ["time", "x", "y", "misc"];

const LINE_END: &str = "\r\n";

#[derive(thiserror::Error, Debug)]
pub enum ExportError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Number formatting for the `x`/`y` columns.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CsvFormat {
    /// Fixed number of decimals; `None` writes the shortest representation
    /// that round-trips.
    #[serde(default)]
    pub precision: Option<usize>,
}

impl CsvFormat {
    fn number(&self, v: f64) -> String {
        match self.precision {
            Some(digits) => format!("{v:.digits$}"),
            None => {
                let mut s = v.to_string();
                if v.is_finite() && !s.contains('.') {
                    s.push_str(".0");
                }
                s
            }
        }
    }
}

/// `out_<identity>.csv`
pub fn csv_file_name(identity: &ObjectIdentity) -> String {
    format!("out_{identity}.csv")
}

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\r', '\n']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Write the header and one row per record, in order.
pub fn write_track_csv<W: Write>(
    mut out: W,
    records: &[MotionRecord],
    format: &CsvFormat,
) -> io::Result<()> {
    write!(out, "{}{LINE_END}", CSV_HEADER.join(","))?;
    for r in records {
        write!(
            out,
            "{},{},{},{}{LINE_END}",
            escape(&r.time),
            format.number(r.x),
            format.number(r.y),
            escape(&r.memo)
        )?;
    }
    out.flush()
}

impl TrackStore {
    /// Write every track to `dir/out_<identity>.csv`, overwriting existing
    /// files. Returns the written paths in identity order.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, dir, format), fields(tracks = self.len()))
    )]
    pub fn write_csv_dir(
        &self,
        dir: impl AsRef<Path>,
        format: &CsvFormat,
    ) -> Result<Vec<PathBuf>, ExportError> {
        let dir = dir.as_ref();
        let mut written = Vec::with_capacity(self.len());
        for (identity, records) in self.iter() {
            let path = dir.join(csv_file_name(identity));
            let result = File::create(&path)
                .and_then(|file| write_track_csv(BufWriter::new(file), records, format));
            if let Err(source) = result {
                return Err(ExportError::Io { path, source });
            }
            log::debug!("wrote {} records to {}", records.len(), path.display());
            written.push(path);
        }
        Ok(written)
    }
}
