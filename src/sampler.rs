// Copyright (c) 2026 Gaussmark Contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Pseudogaussian sample generation.
//!
//! A codeword is imprinted on white Gaussian noise through the Fourier
//! domain: the noise plane is transformed, its zero frequency shifted to the
//! center, and the centered spectrum replaced by `codeword · |spectrum|`.
//! Because the Fourier transform of a Gaussian field is itself Gaussian, the
//! inverse transform of the modulated spectrum still resembles Gaussian
//! noise in the spatial domain while carrying the codeword's signature in
//! its magnitude spectrum.
//!
//! The modulated spectrum uses the full complex magnitude and zero phase.
//! For a real noise plane the magnitude spectrum is conjugate-symmetric, so
//! the inverse transform is real up to rounding; the real part is taken.
//!
//! The noise source is an explicit `Rng` argument, never process-wide state:
//! callers seed a `ChaCha20Rng` for reproducible embedding streams, and
//! [`sample_batch`] derives one independent stream per codeword so batches
//! parallelize without shared mutable state.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rand_distr::StandardNormal;
use rayon::prelude::*;

use crate::basis::Basis;
use crate::error::{Result, SignalError};
use crate::fft;
use crate::field::{Field, Shape};

/// Generate a pseudogaussian sample of `shape` carrying `codeword`.
///
/// The codeword is reshaped (never resampled) into `shape`; its element
/// count must match exactly. Every codeword value must be finite — this is
/// checked up front so a bad input fails loudly instead of leaking NaN
/// through the Fourier transform.
///
/// An all-zero codeword yields an exactly-zero sample; finite inputs always
/// yield finite output.
pub fn sample<R: Rng + ?Sized>(codeword: &[f64], shape: Shape, rng: &mut R) -> Result<Field> {
    validate_codeword(codeword, shape)?;

    let plane = shape.plane_len();
    let mut out = Field::zeros(shape);

    for c in 0..shape.channels {
        let code_plane = &codeword[c * plane..(c + 1) * plane];

        // Fresh standard-normal noise for this plane.
        let noise: Vec<f64> = (0..plane).map(|_| rng.sample(StandardNormal)).collect();

        let mut spectrum = fft::fft2(&noise, shape.width, shape.height);
        fft::fftshift(&mut spectrum);

        // Centered spectrum := codeword · |noise spectrum|, zero phase.
        for (bin, &code) in spectrum.data.iter_mut().zip(code_plane) {
            let magnitude = bin.norm();
            bin.re = code * magnitude;
            bin.im = 0.0;
        }

        fft::ifftshift(&mut spectrum);
        out.channel_mut(c).copy_from_slice(&fft::ifft2_real(&spectrum));
    }

    Ok(out)
}

/// Generate a pseudogaussian sample and project it into `basis` coordinates.
///
/// Flattens the sample and applies `x @ Bᵀ`; the basis dimension must equal
/// the shape's element count. The detection side must rotate its statistic
/// with the same basis instance for recovery to be meaningful.
pub fn sample_projected<R: Rng + ?Sized>(
    codeword: &[f64],
    shape: Shape,
    basis: &Basis,
    rng: &mut R,
) -> Result<Vec<f64>> {
    if basis.size() != shape.len() {
        return Err(SignalError::DimensionMismatch {
            basis: basis.size(),
            vector: shape.len(),
        });
    }
    let flat = sample(codeword, shape, rng)?.into_vec();
    basis.project(&flat)
}

/// Sample one pseudogaussian field per codeword, in parallel.
///
/// Each codeword gets its own ChaCha20 stream (`set_stream(index)`) derived
/// from `seed`, so results are deterministic, independent of rayon's
/// scheduling, and identical to sequential per-stream calls.
pub fn sample_batch(codewords: &[Vec<f64>], shape: Shape, seed: [u8; 32]) -> Result<Vec<Field>> {
    codewords
        .par_iter()
        .enumerate()
        .map(|(i, codeword)| {
            let mut rng = ChaCha20Rng::from_seed(seed);
            rng.set_stream(i as u64);
            sample(codeword, shape, &mut rng)
        })
        .collect()
}

fn validate_codeword(codeword: &[f64], shape: Shape) -> Result<()> {
    if shape.is_empty() {
        return Err(SignalError::InvalidDimension(0));
    }
    if codeword.len() != shape.len() {
        return Err(SignalError::ShapeMismatch {
            expected: shape.len(),
            actual: codeword.len(),
        });
    }
    if let Some(index) = codeword.iter().position(|v| !v.is_finite()) {
        return Err(SignalError::NonFiniteCodeword { index });
    }
    Ok(())
}
