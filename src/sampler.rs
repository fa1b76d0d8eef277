//! Latent factor sampling for the rating model

use crate::config::validate_factor_params;
use crate::error::{RatingMillError, Result};
use crate::matrix::Matrix;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, StandardNormal};
use tracing::debug;

/// Source of standard-normal draws for the factor model
pub trait FactorSampler {
    /// Draw a `rows` x `cols` matrix of independent N(0, 1) values in row-major order
    fn sample_standard_normal(&mut self, rows: usize, cols: usize) -> Matrix<f64>;
}

/// Seedable pseudo-random sampler
pub struct RandomFactorSampler {
    rng: StdRng,
}

impl RandomFactorSampler {
    /// Create a sampler; `None` seeds from OS entropy
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl FactorSampler for RandomFactorSampler {
    fn sample_standard_normal(&mut self, rows: usize, cols: usize) -> Matrix<f64> {
        let rng = &mut self.rng;
        Matrix::from_fn(rows, cols, |_, _| StandardNormal.sample(&mut *rng))
    }
}

/// Sampler that returns the same value for every draw, for testing
pub struct ConstantSampler {
    value: f64,
}

impl ConstantSampler {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl FactorSampler for ConstantSampler {
    fn sample_standard_normal(&mut self, rows: usize, cols: usize) -> Matrix<f64> {
        Matrix::filled(rows, cols, self.value)
    }
}

/// Rank-k factor model: user factors P (m x k), item factors Q (n x k), noise E (m x n)
#[derive(Debug, Clone)]
pub struct FactorModel {
    users: Matrix<f64>,
    items: Matrix<f64>,
    noise: Matrix<f64>,
}

impl FactorModel {
    /// Draw P, Q and `noise_std`-scaled noise, in that order
    pub fn sample<S: FactorSampler + ?Sized>(
        sampler: &mut S,
        num_users: usize,
        num_items: usize,
        rank: usize,
        noise_std: f64,
    ) -> Result<Self> {
        if num_users == 0 || num_items == 0 {
            return Err(RatingMillError::invalid_config(format!(
                "rating matrix must be non-empty, got {}x{}",
                num_users, num_items
            )));
        }
        validate_factor_params(rank, noise_std)?;

        debug!(
            "Sampling factor model: users={} items={} rank={} std={}",
            num_users, num_items, rank, noise_std
        );

        let users = sampler.sample_standard_normal(num_users, rank);
        let items = sampler.sample_standard_normal(num_items, rank);
        let noise = sampler
            .sample_standard_normal(num_users, num_items)
            .map(|v| noise_std * v);

        Ok(Self { users, items, noise })
    }

    /// Assemble a model from known factors
    pub fn from_parts(
        users: Matrix<f64>,
        items: Matrix<f64>,
        noise: Matrix<f64>,
    ) -> Result<Self> {
        if users.cols() != items.cols() {
            return Err(RatingMillError::shape_mismatch(format!(
                "user factors have rank {}, item factors have rank {}",
                users.cols(),
                items.cols()
            )));
        }
        if noise.shape() != (users.rows(), items.rows()) {
            return Err(RatingMillError::shape_mismatch(format!(
                "noise is {}x{}, expected {}x{}",
                noise.rows(),
                noise.cols(),
                users.rows(),
                items.rows()
            )));
        }
        Ok(Self { users, items, noise })
    }

    pub fn users(&self) -> &Matrix<f64> {
        &self.users
    }

    pub fn items(&self) -> &Matrix<f64> {
        &self.items
    }

    pub fn noise(&self) -> &Matrix<f64> {
        &self.noise
    }

    /// Raw scores `P * Q^T + E`
    pub fn scores(&self) -> Result<Matrix<f64>> {
        self.users.mul_transpose(&self.items)?.add(&self.noise)
    }
}
