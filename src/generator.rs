//! Rating generation pipeline: sample, quantize, append

use crate::config::GenerationConfig;
use crate::error::Result;
use crate::matrix::RatingMatrix;
use crate::quantizer::RatingQuantizer;
use crate::sampler::{FactorModel, FactorSampler, RandomFactorSampler};
use crate::writer::RatingWriter;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of one generation run
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub output_path: PathBuf,
    pub num_users: usize,
    pub num_items: usize,
    pub num_records: usize,
    pub generation_time: Duration,
    pub export_time: Duration,
}

impl GenerationResult {
    /// Print a summary of the generation
    pub fn print_summary(&self) {
        println!("✅ Generation Complete!");
        println!("  📁 Output: {}", self.output_path.display());
        println!("  👤 Users: {}", self.num_users);
        println!("  🎬 Items: {}", self.num_items);
        println!("  📊 Ratings: {}", self.num_records);
        println!("  ⏱️  Generation: {:.3}s", self.generation_time.as_secs_f64());
        println!("  ⏱️  Export: {:.3}s", self.export_time.as_secs_f64());
    }
}

/// Synthetic rating generator
pub struct RatingGenerator {
    config: GenerationConfig,
    seed: Option<u64>,
    progress_bar: Option<ProgressBar>,
}

impl RatingGenerator {
    /// Create a generator; without a seed each run draws fresh entropy
    pub fn new(config: GenerationConfig) -> Self {
        Self {
            config,
            seed: None,
            progress_bar: None,
        }
    }

    /// Set the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable progress bar
    pub fn with_progress(mut self) -> Self {
        self.progress_bar = Some(ProgressBar::new(0));
        self
    }

    /// Generate ratings and append them to the configured file
    pub fn generate(&mut self) -> Result<GenerationResult> {
        let mut sampler = RandomFactorSampler::new(self.seed);
        self.generate_with(&mut sampler)
    }

    /// Run the pipeline with an injected sampler
    pub fn generate_with<S: FactorSampler + ?Sized>(
        &mut self,
        sampler: &mut S,
    ) -> Result<GenerationResult> {
        self.config.validate()?;

        info!(
            "Generating {}x{} ratings (rank {}, noise std {})",
            self.config.num_users, self.config.num_items, self.config.rank, self.config.noise_std
        );

        let generation_start = Instant::now();
        let ratings = self.generate_matrix(sampler)?;
        let generation_time = generation_start.elapsed();

        let export_start = Instant::now();
        let num_records = self.export(&ratings)?;
        let export_time = export_start.elapsed();

        info!(
            "Appended {} ratings to {}",
            num_records,
            self.config.file_name.display()
        );

        Ok(GenerationResult {
            output_path: self.config.file_name.clone(),
            num_users: ratings.rows(),
            num_items: ratings.cols(),
            num_records,
            generation_time,
            export_time,
        })
    }

    /// Sample the factor model and quantize its scores, without touching disk
    pub fn generate_matrix<S: FactorSampler + ?Sized>(
        &self,
        sampler: &mut S,
    ) -> Result<RatingMatrix> {
        let model = FactorModel::sample(
            sampler,
            self.config.num_users,
            self.config.num_items,
            self.config.rank,
            self.config.noise_std,
        )?;
        let scores = model.scores()?;
        debug!("Raw score matrix: {}x{}", scores.rows(), scores.cols());

        Ok(RatingQuantizer::new().quantize_matrix(&scores))
    }

    /// Append the ratings to the configured file
    fn export(&self, ratings: &RatingMatrix) -> Result<usize> {
        let writer = RatingWriter::new(&self.config.file_name)
            .with_offsets(self.config.start_user_id, self.config.start_item_id);

        if let Some(pb) = &self.progress_bar {
            pb.set_length(ratings.rows() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} users {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("#>-"),
            );
        }

        let written = writer.append_with_progress(ratings, self.progress_bar.as_ref())?;

        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("✅ Ratings written");
        }

        Ok(written)
    }
}
