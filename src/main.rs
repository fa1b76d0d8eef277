//! RatingMill - Command-line interface for synthetic rating generation

use clap::Parser;
use ratingmill::{GenerationConfig, RatingGenerator, Result};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "generate",
    about = "Append a synthetic low-rank rating matrix to a UserID::ItemID::Rating file",
    version = env!("CARGO_PKG_VERSION"),
    allow_negative_numbers = true
)]
struct Cli {
    /// Output file, appended to if it exists
    #[arg(default_value = "ratings.dat")]
    file_name: PathBuf,

    /// Number of individuals (rows)
    #[arg(default_value_t = 100)]
    m: usize,

    /// Number of items (columns)
    #[arg(default_value_t = 50)]
    n: usize,

    /// Rank of the latent factor model
    #[arg(default_value_t = 10)]
    k: usize,

    /// Standard deviation of the Gaussian noise
    #[arg(default_value_t = 1.0)]
    std: f64,

    /// ID of the first user
    #[arg(default_value_t = 1)]
    start_user_id: i64,

    /// ID of the first item
    #[arg(default_value_t = 1)]
    start_movie_id: i64,

    /// Random seed for reproducibility
    #[arg(long)]
    seed: Option<u64>,

    /// Show progress bar
    #[arg(short = 'p', long)]
    progress: bool,

    /// Verbose output
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn to_config(&self) -> GenerationConfig {
        GenerationConfig::new(&self.file_name, self.m, self.n, self.k)
            .with_noise_std(self.std)
            .with_start_ids(self.start_user_id, self.start_movie_id)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.to_config();
    debug!("Configuration:\n{}", config.to_json()?);

    let mut generator = RatingGenerator::new(config);
    if let Some(seed) = cli.seed {
        generator = generator.with_seed(seed);
    }
    if cli.progress {
        generator = generator.with_progress();
    }

    let result = generator.generate()?;

    result.print_summary();

    Ok(())
}
