//! Serialization of rating matrices to `UserID::ItemID::Rating` text files

use crate::error::{RatingMillError, Result};
use crate::matrix::RatingMatrix;
use indicatif::ProgressBar;
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

/// Field separator used in ratings files
pub const DELIMITER: &str = "::";

/// One line of a ratings file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RatingRecord {
    pub user_id: i64,
    pub item_id: i64,
    pub rating: u8,
}

impl fmt::Display for RatingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.user_id, DELIMITER, self.item_id, DELIMITER, self.rating
        )
    }
}

impl FromStr for RatingRecord {
    type Err = RatingMillError;

    fn from_str(line: &str) -> Result<Self> {
        let fields: Vec<&str> = line.trim_end().split(DELIMITER).collect();
        let [user, item, rating] = fields.as_slice() else {
            return Err(RatingMillError::parse(format!(
                "expected 3 '{}'-separated fields, got {} in {:?}",
                DELIMITER,
                fields.len(),
                line
            )));
        };

        let id = |name: &str, value: &str| {
            value.parse::<i64>().map_err(|e| {
                RatingMillError::parse(format!("invalid {} {:?}: {}", name, value, e))
            })
        };

        let rating = rating.parse::<u8>().map_err(|e| {
            RatingMillError::parse(format!("invalid rating {:?}: {}", rating, e))
        })?;

        Ok(Self {
            user_id: id("user id", *user)?,
            item_id: id("item id", *item)?,
            rating,
        })
    }
}

/// ID `index` positions after `start`, or `None` if it does not fit in an i64
pub(crate) fn offset_id(start: i64, index: usize) -> Option<i64> {
    i64::try_from(index).ok().and_then(|i| start.checked_add(i))
}

/// Appends rating matrices to a file, one record per line
#[derive(Debug, Clone)]
pub struct RatingWriter {
    path: PathBuf,
    start_user_id: i64,
    start_item_id: i64,
}

impl RatingWriter {
    /// Create a writer with IDs starting at 1
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            start_user_id: 1,
            start_item_id: 1,
        }
    }

    /// Set the IDs assigned to the first row and column
    pub fn with_offsets(mut self, start_user_id: i64, start_item_id: i64) -> Self {
        self.start_user_id = start_user_id;
        self.start_item_id = start_item_id;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record for matrix cell (row, col) with the configured offsets applied
    pub fn record(&self, row: usize, col: usize, rating: u8) -> Result<RatingRecord> {
        let user_id = offset_id(self.start_user_id, row).ok_or_else(|| {
            RatingMillError::invalid_config(format!(
                "user ID {} + {} overflows",
                self.start_user_id, row
            ))
        })?;
        let item_id = offset_id(self.start_item_id, col).ok_or_else(|| {
            RatingMillError::invalid_config(format!(
                "item ID {} + {} overflows",
                self.start_item_id, col
            ))
        })?;
        Ok(RatingRecord {
            user_id,
            item_id,
            rating,
        })
    }

    /// Append every entry in row-major order; returns the number of lines written
    pub fn append(&self, ratings: &RatingMatrix) -> Result<usize> {
        self.append_with_progress(ratings, None)
    }

    /// Same as [`append`](Self::append), advancing `progress` once per row
    pub fn append_with_progress(
        &self,
        ratings: &RatingMatrix,
        progress: Option<&ProgressBar>,
    ) -> Result<usize> {
        // The largest IDs are checked up front so a bad offset writes nothing
        if let (Some(last_row), Some(last_col)) =
            (ratings.rows().checked_sub(1), ratings.cols().checked_sub(1))
        {
            self.record(last_row, last_col, 0)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                RatingMillError::with_context(format!("Failed to open {}", self.path.display()), e)
            })?;
        let mut out = BufWriter::new(file);

        let mut written = 0;
        for (i, row) in ratings.rows_iter().enumerate() {
            for (j, &rating) in row.iter().enumerate() {
                writeln!(out, "{}", self.record(i, j, rating)?)?;
                written += 1;
            }
            if let Some(pb) = progress {
                pb.inc(1);
            }
        }
        out.flush()?;

        debug!("Appended {} records to {}", written, self.path.display());
        Ok(written)
    }
}

/// Read a ratings file back into records, in file order
pub fn read_ratings(path: impl AsRef<Path>) -> Result<Vec<RatingRecord>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        RatingMillError::with_context(format!("Failed to read {}", path.display()), e)
    })?;

    content
        .lines()
        .filter(|line| !line.is_empty())
        .map(RatingRecord::from_str)
        .collect()
}
