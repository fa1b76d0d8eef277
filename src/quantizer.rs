//! Quantization of raw scores onto the 1..=5 rating scale

use crate::matrix::{Matrix, RatingMatrix};
use std::f64::consts::PI;

/// Lowest rating
pub const MIN_RATING: u8 = 1;

/// Highest rating
pub const MAX_RATING: u8 = 5;

/// Map a real score to a rating.
///
/// The score is squashed into (0, 1) with `atan(x) / pi + 0.5`, then scaled
/// onto `MIN_RATING..=MAX_RATING` and floored. The mapping is monotonically
/// non-decreasing and saturates at both ends: `+inf` lands exactly on 1.0
/// before scaling, so the result is clamped. NaN maps to `MIN_RATING`.
pub fn float_to_rating(x: f64) -> u8 {
    let y = x.atan() / PI + 0.5;
    let levels = f64::from(MAX_RATING - MIN_RATING + 1);
    let r = (f64::from(MIN_RATING) + levels * y).floor();

    if r.is_nan() {
        return MIN_RATING;
    }
    r.clamp(f64::from(MIN_RATING), f64::from(MAX_RATING)) as u8
}

/// Elementwise quantizer for whole score matrices
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingQuantizer;

impl RatingQuantizer {
    pub fn new() -> Self {
        Self
    }

    /// Quantize every score, preserving shape
    pub fn quantize_matrix(&self, scores: &Matrix<f64>) -> RatingMatrix {
        scores.par_map(|&x| float_to_rating(x))
    }
}
