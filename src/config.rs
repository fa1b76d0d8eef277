//! Configuration for a rating generation run

use crate::error::{RatingMillError, Result};
use crate::writer::offset_id;
use serde::Serialize;
use std::path::PathBuf;

/// Default output file name
pub const DEFAULT_FILE_NAME: &str = "ratings.dat";

/// Parameters of a single generation run
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GenerationConfig {
    /// File the ratings are appended to
    pub file_name: PathBuf,
    /// Number of individuals (matrix rows)
    pub num_users: usize,
    /// Number of items (matrix columns)
    pub num_items: usize,
    /// Rank of the latent factor model
    pub rank: usize,
    /// Standard deviation of the additive Gaussian noise
    pub noise_std: f64,
    /// ID assigned to the first row
    pub start_user_id: i64,
    /// ID assigned to the first column
    pub start_item_id: i64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            file_name: PathBuf::from(DEFAULT_FILE_NAME),
            num_users: 100,
            num_items: 50,
            rank: 10,
            noise_std: 1.0,
            start_user_id: 1,
            start_item_id: 1,
        }
    }
}

impl GenerationConfig {
    /// Create a configuration for an `num_users` x `num_items` matrix of the given rank
    pub fn new(
        file_name: impl Into<PathBuf>,
        num_users: usize,
        num_items: usize,
        rank: usize,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            num_users,
            num_items,
            rank,
            ..Self::default()
        }
    }

    pub fn with_noise_std(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    pub fn with_start_ids(mut self, start_user_id: i64, start_item_id: i64) -> Self {
        self.start_user_id = start_user_id;
        self.start_item_id = start_item_id;
        self
    }

    /// Reject parameters that would produce degenerate output
    pub fn validate(&self) -> Result<()> {
        if self.num_users == 0 {
            return Err(RatingMillError::invalid_config("number of users must be at least 1"));
        }
        if self.num_items == 0 {
            return Err(RatingMillError::invalid_config("number of items must be at least 1"));
        }
        check_id_range("user", self.start_user_id, self.num_users)?;
        check_id_range("item", self.start_item_id, self.num_items)?;
        validate_factor_params(self.rank, self.noise_std)
    }

    /// Number of rating lines one run appends
    pub fn num_records(&self) -> usize {
        self.num_users * self.num_items
    }

    /// Render the configuration as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// The last of `count` consecutive IDs starting at `start` must fit in an i64
fn check_id_range(kind: &str, start: i64, count: usize) -> Result<()> {
    if offset_id(start, count.saturating_sub(1)).is_none() {
        return Err(RatingMillError::invalid_config(format!(
            "{} IDs starting at {} overflow for {} entries",
            kind, start, count
        )));
    }
    Ok(())
}

/// Shared check for the factor model parameters
pub(crate) fn validate_factor_params(rank: usize, noise_std: f64) -> Result<()> {
    if rank == 0 {
        return Err(RatingMillError::invalid_config("rank must be at least 1"));
    }
    if !noise_std.is_finite() || noise_std < 0.0 {
        return Err(RatingMillError::invalid_config(format!(
            "noise standard deviation must be finite and non-negative, got {}",
            noise_std
        )));
    }
    Ok(())
}
