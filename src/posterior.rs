// Copyright (c) 2026 Gaussmark Contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Closed-form posterior recovery from an observed statistic.
//!
//! Models the observed statistic as a two-component Gaussian mixture — one
//! Gaussian centered on the embedded signal plus detection noise of assumed
//! variance `v` — which collapses to the elementwise soft estimator
//! `erf(z / sqrt(2v(1+v)))`. The result lives in [-1, 1]: 0 means no
//! information, ±1 near-certainty about the embedded value's sign. The
//! mapping is odd-symmetric and monotone in `z`.
//!
//! When the sampler projected its output through a basis, the statistic must
//! be rotated back (`z @ B`) with the **same** basis instance before the
//! mapping; [`Basis`](crate::basis::Basis) construction already guarantees
//! orthonormality, so the rotation here only checks dimensions.

use crate::basis::Basis;
use crate::error::{Result, SignalError};
use crate::math::erf;

/// Assumed detection-noise variance when the caller supplies none.
pub const DEFAULT_VARIANCE: f64 = 1.5;

/// Assumed per-element detection-noise variance.
#[derive(Clone, Debug, PartialEq)]
pub enum Variances {
    /// One variance for every element of the statistic.
    Uniform(f64),
    /// Elementwise variances; length must be 1 or match the (possibly
    /// rotated) statistic.
    PerElement(Vec<f64>),
}

/// Recover per-element posterior estimates of the embedded codeword values.
///
/// Applies `erf(z' / sqrt(2v(1+v)))` elementwise, where `z'` is `z` rotated
/// by `basis` when one is supplied and `v` defaults to [`DEFAULT_VARIANCE`].
///
/// Fails with [`SignalError::VarianceDomain`] for any variance that is not
/// finite and strictly positive (the denominator's square-root argument
/// would be non-positive — this is never converted to NaN), and with
/// [`SignalError::VarianceBroadcast`] when a per-element variance vector
/// cannot broadcast against the statistic.
pub fn recover_posteriors(
    z: &[f64],
    basis: Option<&Basis>,
    variances: Option<&Variances>,
) -> Result<Vec<f64>> {
    let rotated = match basis {
        Some(b) => Some(b.rotate(z)?),
        None => None,
    };
    let z = rotated.as_deref().unwrap_or(z);

    let default = Variances::Uniform(DEFAULT_VARIANCE);
    let variances = variances.unwrap_or(&default);

    match variances {
        Variances::Uniform(v) => {
            let d = denominator(*v)?;
            Ok(z.iter().map(|&zi| erf(zi / d)).collect())
        }
        Variances::PerElement(vs) => match vs.len() {
            // A length-1 vector broadcasts like a scalar.
            1 => {
                let d = denominator(vs[0])?;
                Ok(z.iter().map(|&zi| erf(zi / d)).collect())
            }
            len if len == z.len() => z
                .iter()
                .zip(vs)
                .map(|(&zi, &v)| Ok(erf(zi / denominator(v)?)))
                .collect(),
            len => Err(SignalError::VarianceBroadcast { len, expected: z.len() }),
        },
    }
}

/// `sqrt(2v(1+v))`, rejecting variances outside the estimator's domain.
fn denominator(v: f64) -> Result<f64> {
    if !v.is_finite() || v <= 0.0 {
        return Err(SignalError::VarianceDomain(v));
    }
    Ok((2.0 * v * (1.0 + v)).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn zero_statistic_maps_to_zero() {
        let z = vec![0.0; 4 * 64 * 64];
        let p = recover_posteriors(&z, None, None).unwrap();
        assert_eq!(p.len(), z.len());
        assert!(p.iter().all(|&v| v == 0.0));

        // Regardless of variance setting.
        let p = recover_posteriors(&z, None, Some(&Variances::Uniform(0.01))).unwrap();
        assert!(p.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn scenario_variance_two() {
        // d = sqrt(2·2·3) = sqrt(12); erf(1/sqrt(12)) ≈ 0.3169
        let p = recover_posteriors(&[1.0], None, Some(&Variances::Uniform(2.0))).unwrap();
        assert!((p[0] - 0.3169).abs() < 1e-3, "got {}", p[0]);
    }

    #[test]
    fn odd_symmetry() {
        let z: Vec<f64> = (-20..=20).map(|i| i as f64 * 0.37).collect();
        let neg: Vec<f64> = z.iter().map(|v| -v).collect();

        let p = recover_posteriors(&z, None, None).unwrap();
        let pn = recover_posteriors(&neg, None, None).unwrap();
        for (a, b) in p.iter().zip(pn.iter()) {
            assert_eq!(*a, -*b);
        }
    }

    #[test]
    fn monotone_and_bounded() {
        let z: Vec<f64> = (-100..=100).map(|i| i as f64 * 0.1).collect();
        let p = recover_posteriors(&z, None, Some(&Variances::Uniform(0.8))).unwrap();

        let mut prev = -1.0;
        for &v in &p {
            assert!((-1.0..=1.0).contains(&v));
            assert!(v >= prev, "posterior not monotone");
            prev = v;
        }
        // Saturates toward ±1 at the extremes.
        assert!(p[0] < -0.999);
        assert!(*p.last().unwrap() > 0.999);
    }

    #[test]
    fn invalid_variances_are_domain_errors() {
        for &v in &[-2.0, 0.0, -1.0, -0.5, f64::NAN, f64::INFINITY] {
            let err = recover_posteriors(&[1.0], None, Some(&Variances::Uniform(v))).unwrap_err();
            assert!(
                matches!(err, SignalError::VarianceDomain(_)),
                "variance {v} not rejected: {err:?}"
            );
        }

        // Per-element: one bad entry poisons the call.
        let err = recover_posteriors(
            &[1.0, 1.0],
            None,
            Some(&Variances::PerElement(vec![1.0, -2.0])),
        )
        .unwrap_err();
        assert_eq!(err, SignalError::VarianceDomain(-2.0));
    }

    #[test]
    fn per_element_broadcast_rules() {
        let z = [0.5, 1.0, 1.5];

        // Length 1 broadcasts like a scalar.
        let scalar = recover_posteriors(&z, None, Some(&Variances::Uniform(1.5))).unwrap();
        let len_one =
            recover_posteriors(&z, None, Some(&Variances::PerElement(vec![1.5]))).unwrap();
        assert_eq!(scalar, len_one);

        // Matching length works elementwise.
        let per = recover_posteriors(
            &z,
            None,
            Some(&Variances::PerElement(vec![1.5, 1.5, 1.5])),
        )
        .unwrap();
        assert_eq!(scalar, per);

        // Anything else is a broadcast error.
        let err =
            recover_posteriors(&z, None, Some(&Variances::PerElement(vec![1.5, 1.5]))).unwrap_err();
        assert_eq!(err, SignalError::VarianceBroadcast { len: 2, expected: 3 });
    }

    #[test]
    fn default_variance_matches_explicit() {
        let z = [0.3, -0.7, 2.1];
        let implicit = recover_posteriors(&z, None, None).unwrap();
        let explicit =
            recover_posteriors(&z, None, Some(&Variances::Uniform(DEFAULT_VARIANCE))).unwrap();
        assert_eq!(implicit, explicit);
    }

    #[test]
    fn basis_rotation_undoes_projection() {
        let mut rng = ChaCha20Rng::from_seed([5u8; 32]);
        let basis = Basis::random(12, &mut rng).unwrap();
        let x: Vec<f64> = (0..12).map(|i| (i as f64) * 0.25 - 1.5).collect();

        let projected = basis.project(&x).unwrap();
        let with_basis = recover_posteriors(&projected, Some(&basis), None).unwrap();
        let without = recover_posteriors(&x, None, None).unwrap();

        for (a, b) in with_basis.iter().zip(without.iter()) {
            assert!((a - b).abs() < 1e-9, "basis path diverged: {a} vs {b}");
        }
    }

    #[test]
    fn basis_dimension_checked() {
        let basis = Basis::identity(4).unwrap();
        let err = recover_posteriors(&[1.0; 3], Some(&basis), None).unwrap_err();
        assert_eq!(err, SignalError::DimensionMismatch { basis: 4, vector: 3 });
    }
}
