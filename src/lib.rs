//! RatingMill - Synthetic user/item rating generation
//!
//! This crate produces rating datasets for recommender-system benchmarks.
//! Ratings come from a rank-k latent factor model: random user factors `P`
//! and item factors `Q` are multiplied, Gaussian noise is added, and the
//! resulting scores are squashed onto an integer 1..=5 scale.
//!
//! # Features
//!
//! - **Low-rank structure**: `P * Q^T + E`, recoverable by matrix factorization
//! - **Bounded ratings**: saturating, monotonic quantization onto 1..=5
//! - **Append-only output**: `UserID::ItemID::Rating` lines, never truncated
//! - **Reproducibility**: optional seeded sampling
//!
//! # Example
//!
//! ```no_run
//! use ratingmill::{GenerationConfig, RatingGenerator};
//!
//! let config = GenerationConfig::new("ratings.dat", 100, 50, 10);
//! let mut generator = RatingGenerator::new(config).with_seed(42);
//! let result = generator.generate()?;
//! assert_eq!(result.num_records, 5_000);
//! # Ok::<(), ratingmill::RatingMillError>(())
//! ```

pub mod config;
pub mod error;
pub mod generator;
pub mod matrix;
pub mod quantizer;
pub mod sampler;
pub mod writer;

pub use config::GenerationConfig;
pub use error::{RatingMillError, Result};
pub use generator::{GenerationResult, RatingGenerator};
pub use matrix::{Matrix, RatingMatrix};
pub use quantizer::{float_to_rating, RatingQuantizer, MAX_RATING, MIN_RATING};
pub use sampler::{ConstantSampler, FactorModel, FactorSampler, RandomFactorSampler};
pub use writer::{read_ratings, RatingRecord, RatingWriter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::GenerationConfig;
    pub use crate::error::Result;
    pub use crate::generator::RatingGenerator;
}
