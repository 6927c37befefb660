// Copyright (c) 2026 Gaussmark Contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Random orthonormal bases for decorrelated-coordinate projection.
//!
//! A [`Basis`] rotates flattened samples and observed statistics into a
//! shared coordinate system: the sampler applies `x @ Bᵀ` and recovery
//! applies `z @ B`, so the two sides cancel when the same basis instance is
//! used on both. Orthonormality (`BᵀB = I`) is a constructor-enforced
//! invariant — [`Basis::from_raw`] validates it and [`Basis::random`]
//! produces it by construction — so projection never has to re-check.
//!
//! The embedding and detection pipelines must share one basis; a basis is
//! immutable after construction and safe to share across threads.

use crate::error::{Result, SignalError};
use rand::Rng;
use rand_distr::StandardNormal;

/// Maximum allowed deviation of `BᵀB` from the identity in [`Basis::from_raw`].
pub const ORTHO_TOL: f64 = 1e-6;

/// A square matrix with orthonormal columns, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Basis {
    n: usize,
    data: Vec<f64>,
}

impl Basis {
    /// Draw a random `n × n` orthonormal basis from the given generator.
    ///
    /// Fills the matrix with i.i.d. standard-normal entries and
    /// orthonormalizes the columns by modified Gram–Schmidt (the QR
    /// orthogonalization of a Gaussian matrix, which is Haar-distributed
    /// over the orthogonal group). Reproducible given a seeded `rng`.
    pub fn random<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Self> {
        if n == 0 {
            return Err(SignalError::InvalidDimension(0));
        }
        let mut data = vec![0.0f64; n * n];
        for j in 0..n {
            // Redraw if the column collapses under orthogonalization.
            // Probability zero for Gaussian draws, guarded regardless.
            loop {
                for i in 0..n {
                    data[i * n + j] = rng.sample(StandardNormal);
                }
                // Two Gram-Schmidt passes keep the off-diagonal residual at
                // rounding level even for large n.
                for _ in 0..2 {
                    for k in 0..j {
                        let dot: f64 = (0..n).map(|i| data[i * n + j] * data[i * n + k]).sum();
                        for i in 0..n {
                            data[i * n + j] -= dot * data[i * n + k];
                        }
                    }
                }
                let norm: f64 =
                    (0..n).map(|i| data[i * n + j] * data[i * n + j]).sum::<f64>().sqrt();
                if norm > 1e-10 {
                    for i in 0..n {
                        data[i * n + j] /= norm;
                    }
                    break;
                }
            }
        }
        Ok(Basis { n, data })
    }

    /// Wrap an existing row-major `n × n` matrix, validating orthonormality.
    ///
    /// Rejects matrices whose `BᵀB` deviates from the identity by more than
    /// [`ORTHO_TOL`] in any entry.
    pub fn from_raw(data: Vec<f64>, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(SignalError::InvalidDimension(0));
        }
        if data.len() != n * n {
            return Err(SignalError::ShapeMismatch { expected: n * n, actual: data.len() });
        }
        let basis = Basis { n, data };
        if !basis.is_orthonormal(ORTHO_TOL) {
            return Err(SignalError::BasisNotOrthonormal);
        }
        Ok(basis)
    }

    /// The identity basis (projection and rotation become no-ops).
    pub fn identity(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(SignalError::InvalidDimension(0));
        }
        let mut data = vec![0.0f64; n * n];
        for i in 0..n {
            data[i * n + i] = 1.0;
        }
        Ok(Basis { n, data })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    /// Row-major matrix entries.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Whether `max |BᵀB - I| <= tol`.
    pub fn is_orthonormal(&self, tol: f64) -> bool {
        let n = self.n;
        for a in 0..n {
            for b in a..n {
                let dot: f64 = (0..n).map(|i| self.data[i * n + a] * self.data[i * n + b]).sum();
                let target = if a == b { 1.0 } else { 0.0 };
                if (dot - target).abs() > tol {
                    return false;
                }
            }
        }
        true
    }

    /// Sampler-side projection `x @ Bᵀ`: `y[i] = Σ_j B[i][j] · x[j]`.
    pub fn project(&self, x: &[f64]) -> Result<Vec<f64>> {
        if x.len() != self.n {
            return Err(SignalError::DimensionMismatch { basis: self.n, vector: x.len() });
        }
        let n = self.n;
        let mut y = vec![0.0f64; n];
        for i in 0..n {
            let row = &self.data[i * n..(i + 1) * n];
            y[i] = row.iter().zip(x).map(|(b, v)| b * v).sum();
        }
        Ok(y)
    }

    /// Recovery-side rotation `z @ B`: `y[j] = Σ_i z[i] · B[i][j]`.
    ///
    /// Inverse of [`Basis::project`], since the matrix is orthogonal.
    pub fn rotate(&self, z: &[f64]) -> Result<Vec<f64>> {
        if z.len() != self.n {
            return Err(SignalError::DimensionMismatch { basis: self.n, vector: z.len() });
        }
        let n = self.n;
        let mut y = vec![0.0f64; n];
        for (i, &zi) in z.iter().enumerate() {
            let row = &self.data[i * n..(i + 1) * n];
            for j in 0..n {
                y[j] += zi * row[j];
            }
        }
        Ok(y)
    }
}

/// Draw a random `n × n` orthonormal basis. See [`Basis::random`].
pub fn random_basis<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Basis> {
    Basis::random(n, rng)
}
