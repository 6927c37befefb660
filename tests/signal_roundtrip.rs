// Copyright (c) 2026 Gaussmark Contributors
// SPDX-License-Identifier: GPL-3.0-only

//! End-to-end properties of the sample → project → recover pipeline.

use gaussmark_core::{
    random_basis, recover_posteriors, sample, sample_projected, Shape, SignalError, Variances,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn seeded(tag: u8) -> ChaCha20Rng {
    ChaCha20Rng::from_seed([tag; 32])
}

#[test]
fn sample_full_shape_is_finite() {
    let shape = Shape::new(4, 64, 64);
    let codeword = vec![0.1; shape.len()];
    let field = sample(&codeword, shape, &mut seeded(1)).unwrap();

    assert_eq!(field.shape(), shape);
    assert_eq!(field.data().len(), 4 * 64 * 64);
    assert!(field.data().iter().all(|v| v.is_finite()));
}

#[test]
fn zero_codeword_full_shape_is_zero() {
    let shape = Shape::new(4, 64, 64);
    let field = sample(&vec![0.0; shape.len()], shape, &mut seeded(2)).unwrap();
    assert!(field.data().iter().all(|&v| v == 0.0));
}

#[test]
fn sample_amplitude_tracks_codeword_magnitude() {
    // For a constant codeword α, Parseval gives E[mean(y²)] = α² exactly:
    // the modulated spectrum is α|F| and E|F_k|² = N for unit-variance noise.
    let shape = Shape::new(4, 64, 64);
    let alpha = 0.1;
    let codeword = vec![alpha; shape.len()];

    let mut rng = seeded(3);
    let draws = 40;
    let mut sum_sq = 0.0;
    let mut count = 0usize;
    for _ in 0..draws {
        let field = sample(&codeword, shape, &mut rng).unwrap();
        sum_sq += field.data().iter().map(|v| v * v).sum::<f64>();
        count += field.data().len();
    }
    let mean_sq = sum_sq / count as f64;
    let expected = alpha * alpha;

    assert!(
        (mean_sq - expected).abs() < 0.1 * expected,
        "mean square {mean_sq} not within 10% of {expected}"
    );
}

#[test]
fn random_basis_eight_matches_identity() {
    let basis = random_basis(8, &mut seeded(4)).unwrap();
    assert_eq!(basis.size(), 8);
    assert_eq!(basis.data().len(), 64);

    // max |BᵀB - I| < 1e-6
    let b = basis.data();
    for a in 0..8 {
        for c in 0..8 {
            let dot: f64 = (0..8).map(|i| b[i * 8 + a] * b[i * 8 + c]).sum();
            let target = if a == c { 1.0 } else { 0.0 };
            assert!(
                (dot - target).abs() < 1e-6,
                "BᵀB[{a}][{c}] = {dot}, expected {target}"
            );
        }
    }
}

#[test]
fn recover_zero_statistic_default_variance() {
    let z = vec![0.0; 4 * 64 * 64];
    let p = recover_posteriors(&z, None, None).unwrap();
    assert_eq!(p.len(), 4 * 64 * 64);
    assert!(p.iter().all(|&v| v == 0.0));
}

#[test]
fn negative_variance_is_an_error_not_nan() {
    let err = recover_posteriors(&[0.5], None, Some(&Variances::Uniform(-2.0))).unwrap_err();
    assert_eq!(err, SignalError::VarianceDomain(-2.0));
}

#[test]
fn projected_pipeline_matches_unprojected() {
    // Sampling through a basis and recovering with the same basis must give
    // the same posteriors as the unprojected path on the raw sample.
    let shape = Shape::new(1, 8, 8);
    let n = shape.len();
    let codeword: Vec<f64> = (0..n).map(|i| ((i % 9) as f64 - 4.0) * 0.05).collect();

    let basis = random_basis(n, &mut seeded(5)).unwrap();

    let raw = sample(&codeword, shape, &mut seeded(6)).unwrap();
    let projected = sample_projected(&codeword, shape, &basis, &mut seeded(6)).unwrap();

    let via_basis = recover_posteriors(&projected, Some(&basis), None).unwrap();
    let direct = recover_posteriors(raw.data(), None, None).unwrap();

    assert_eq!(via_basis.len(), direct.len());
    for (a, b) in via_basis.iter().zip(direct.iter()) {
        assert!((a - b).abs() < 1e-9, "pipelines diverged: {a} vs {b}");
    }
}

#[test]
fn mismatched_basis_breaks_round_trip() {
    // Rotating with a different basis than the one used for projection must
    // not reproduce the unprojected posteriors. Guards against the pipeline
    // accidentally ignoring the basis argument.
    let shape = Shape::new(1, 8, 8);
    let n = shape.len();
    let codeword = vec![0.2; n];

    let basis_a = random_basis(n, &mut seeded(7)).unwrap();
    let basis_b = random_basis(n, &mut seeded(8)).unwrap();

    let raw = sample(&codeword, shape, &mut seeded(9)).unwrap();
    let projected = basis_a.project(raw.data()).unwrap();

    let matched = recover_posteriors(&projected, Some(&basis_a), None).unwrap();
    let mismatched = recover_posteriors(&projected, Some(&basis_b), None).unwrap();

    let max_diff = matched
        .iter()
        .zip(mismatched.iter())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f64, f64::max);
    assert!(max_diff > 1e-3, "wrong basis went unnoticed (max diff {max_diff})");
}

#[test]
fn odd_plane_dimensions_round_trip() {
    // Non-power-of-2, odd plane sizes exercise the centering shifts' inverse
    // pair and the arbitrary-length FFT path.
    let shape = Shape::new(2, 15, 9);
    let codeword: Vec<f64> = (0..shape.len()).map(|i| ((i % 3) as f64 - 1.0) * 0.1).collect();

    let field = sample(&codeword, shape, &mut seeded(10)).unwrap();
    assert!(field.data().iter().all(|v| v.is_finite()));

    let p = recover_posteriors(field.data(), None, None).unwrap();
    assert!(p.iter().all(|v| (-1.0..=1.0).contains(v)));
}
