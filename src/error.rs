// Copyright (c) 2026 Gaussmark Contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for the watermark signal core.
//!
//! [`SignalError`] covers every failure mode of sampling, basis construction,
//! and posterior recovery. All errors are surfaced synchronously to the
//! caller; nothing in this crate retries or swallows a failure.

use core::fmt;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, SignalError>;

/// Errors that can occur during sampling, basis construction, or recovery.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalError {
    /// A codeword or field buffer does not match the element count of its
    /// declared shape.
    ShapeMismatch { expected: usize, actual: usize },
    /// A codeword contains a NaN or infinite value at the given index.
    NonFiniteCodeword { index: usize },
    /// `random_basis` was called with a zero dimension.
    InvalidDimension(usize),
    /// A raw matrix failed the orthonormality check (`BᵀB ≠ I`).
    BasisNotOrthonormal,
    /// A vector's length does not match the basis dimension.
    DimensionMismatch { basis: usize, vector: usize },
    /// A variance value is not finite and strictly positive, making the
    /// posterior denominator `sqrt(2v(1+v))` undefined.
    VarianceDomain(f64),
    /// Per-element variances are neither scalar-like (length 1) nor the
    /// same length as the observed statistic.
    VarianceBroadcast { len: usize, expected: usize },
}

impl fmt::Display for SignalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: shape has {expected} elements, buffer has {actual}")
            }
            Self::NonFiniteCodeword { index } => {
                write!(f, "codeword has a non-finite value at index {index}")
            }
            Self::InvalidDimension(n) => {
                write!(f, "basis dimension must be positive, got {n}")
            }
            Self::BasisNotOrthonormal => {
                write!(f, "matrix columns are not orthonormal")
            }
            Self::DimensionMismatch { basis, vector } => {
                write!(f, "basis dimension {basis} does not match vector length {vector}")
            }
            Self::VarianceDomain(v) => {
                write!(f, "variance must be finite and > 0, got {v}")
            }
            Self::VarianceBroadcast { len, expected } => {
                write!(f, "variance array of length {len} cannot broadcast against statistic of length {expected}")
            }
        }
    }
}

impl std::error::Error for SignalError {}
