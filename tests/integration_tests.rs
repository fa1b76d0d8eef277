//! Integration tests for RatingMill

use ratingmill::{
    read_ratings, FactorModel, GenerationConfig, Matrix, RatingGenerator, RatingQuantizer,
    RatingWriter, Result,
};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_known_factors_scenario() -> Result<()> {
    // P = [[1], [-1]], Q = [[1], [1]], no noise
    let users = Matrix::from_rows(&[vec![1.0], vec![-1.0]])?;
    let items = Matrix::from_rows(&[vec![1.0], vec![1.0]])?;
    let model = FactorModel::from_parts(users, items, Matrix::zeros(2, 2))?;

    let scores = model.scores()?;
    assert_eq!(scores.as_slice(), &[1.0, 1.0, -1.0, -1.0]);

    let ratings = RatingQuantizer::new().quantize_matrix(&scores);

    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("ratings.dat");
    RatingWriter::new(&path).append(&ratings)?;

    assert_eq!(fs::read_to_string(&path)?, "1::1::4\n1::2::4\n2::1::2\n2::2::2\n");
    Ok(())
}

#[test]
fn test_round_trip_layout() -> Result<()> {
    let (m, n) = (4, 3);
    let ratings = Matrix::from_fn(m, n, |i, j| ((i + 2 * j) % 5 + 1) as u8);

    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("ratings.dat");
    RatingWriter::new(&path).with_offsets(1, 1).append(&ratings)?;

    let records = read_ratings(&path)?;
    assert_eq!(records.len(), m * n);

    for (idx, record) in records.iter().enumerate() {
        let (i, j) = (idx / n, idx % n);
        assert_eq!(record.user_id, i as i64 + 1);
        assert_eq!(record.item_id, j as i64 + 1);
        assert_eq!(Some(&record.rating), ratings.get(i, j));
    }
    Ok(())
}

#[test]
fn test_append_preserves_existing_lines() -> Result<()> {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("ratings.dat");

    let a = Matrix::filled(2, 3, 1u8);
    let b = Matrix::filled(3, 2, 5u8);

    RatingWriter::new(&path).append(&a)?;
    let first = fs::read_to_string(&path)?;

    RatingWriter::new(&path).with_offsets(3, 1).append(&b)?;
    let both = fs::read_to_string(&path)?;

    assert_eq!(both.lines().count(), 2 * 3 + 3 * 2);
    assert!(both.starts_with(&first));
    assert!(both[first.len()..].lines().all(|line| line.ends_with("::5")));
    Ok(())
}

#[test]
fn test_generated_file_shape_and_range() -> Result<()> {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("ratings.dat");
    let config = GenerationConfig::new(&path, 30, 20, 5)
        .with_noise_std(2.0)
        .with_start_ids(1000, 1);

    let mut generator = RatingGenerator::new(config).with_seed(42);
    let result = generator.generate()?;
    assert_eq!(result.num_users, 30);
    assert_eq!(result.num_items, 20);
    assert_eq!(result.num_records, 600);

    let records = read_ratings(&path)?;
    assert_eq!(records.len(), 600);
    assert_eq!(records.first().map(|r| r.user_id), Some(1000));
    assert_eq!(records.last().map(|r| (r.user_id, r.item_id)), Some((1029, 20)));
    assert!(records.iter().all(|r| (1..=5).contains(&r.rating)));
    Ok(())
}

#[test]
fn test_deterministic_generation() -> Result<()> {
    let temp_dir = tempdir().unwrap();
    let path1 = temp_dir.path().join("a.dat");
    let path2 = temp_dir.path().join("b.dat");

    RatingGenerator::new(GenerationConfig::new(&path1, 10, 8, 3))
        .with_seed(7)
        .generate()?;
    RatingGenerator::new(GenerationConfig::new(&path2, 10, 8, 3))
        .with_seed(7)
        .generate()?;

    assert_eq!(fs::read_to_string(&path1)?, fs::read_to_string(&path2)?);
    Ok(())
}

#[test]
fn test_progress_tracking() -> Result<()> {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("ratings.dat");

    let mut generator = RatingGenerator::new(GenerationConfig::new(&path, 5, 5, 2))
        .with_seed(1)
        .with_progress();
    let result = generator.generate()?;

    assert_eq!(result.num_records, 25);
    Ok(())
}

#[test]
fn test_invalid_parameters_rejected() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("ratings.dat");

    let configs = [
        GenerationConfig::new(&path, 0, 5, 2),
        GenerationConfig::new(&path, 5, 0, 2),
        GenerationConfig::new(&path, 5, 5, 0),
        GenerationConfig::new(&path, 5, 5, 2).with_noise_std(-1.0),
    ];

    for config in configs {
        assert!(RatingGenerator::new(config).generate().is_err());
    }
    assert!(!path.exists());
}

#[test]
fn test_start_id_overflow_leaves_file_untouched() -> Result<()> {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("ratings.dat");
    fs::write(&path, "1::1::3\n")?;

    let config = GenerationConfig::new(&path, 2, 1, 1).with_start_ids(i64::MAX, 1);
    assert!(RatingGenerator::new(config).with_seed(5).generate().is_err());

    let writer = RatingWriter::new(&path).with_offsets(i64::MAX, 1);
    assert!(writer.append(&Matrix::filled(2, 1, 3u8)).is_err());

    assert_eq!(fs::read_to_string(&path)?, "1::1::3\n");
    Ok(())
}

#[test]
fn test_negative_start_ids() -> Result<()> {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("ratings.dat");
    let config = GenerationConfig::new(&path, 2, 2, 1).with_start_ids(-1, -1);

    RatingGenerator::new(config).with_seed(9).generate()?;

    let ids: Vec<(i64, i64)> = read_ratings(&path)?
        .iter()
        .map(|r| (r.user_id, r.item_id))
        .collect();
    assert_eq!(ids, vec![(-1, -1), (-1, 0), (0, -1), (0, 0)]);
    Ok(())
}

#[test]
fn test_error_handling_invalid_path() {
    let config = GenerationConfig::new("/invalid/path/that/does/not/exist/ratings.dat", 2, 2, 1);
    let mut generator = RatingGenerator::new(config);
    assert!(generator.generate().is_err());
}
