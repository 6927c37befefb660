// Copyright (c) 2026 Gaussmark Contributors
// SPDX-License-Identifier: GPL-3.0-only

//! # gaussmark-core
//!
//! Statistical signal core for Fourier-magnitude watermarking. Provides the
//! three primitives an embedding/detection pipeline composes:
//!
//! - **Pseudogaussian sampler** (`sampler`): imprints a codeword on white
//!   Gaussian noise by modulating the magnitude of its centered 2D Fourier
//!   spectrum, producing a spatial-domain field that still resembles
//!   Gaussian noise.
//! - **Basis generator** (`basis`): random orthonormal matrices that rotate
//!   samples and detection statistics into a shared decorrelated coordinate
//!   system.
//! - **Posterior recovery** (`posterior`): the closed-form
//!   `erf(z / sqrt(2v(1+v)))` mapping from an observed statistic and an
//!   assumed noise variance to soft codeword estimates in [-1, 1].
//!
//! How the sample is injected into a carrier image and how the detection
//! statistic is extracted from a degraded one are the caller's concern; this
//! crate is pure computation. All randomness flows through explicit,
//! seedable generators, so embedding streams are reproducible and calls are
//! safe to run concurrently.
//!
//! # Quick start
//!
//! ```rust
//! use gaussmark_core::{sample, recover_posteriors, random_basis, Shape, Variances};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha20Rng;
//!
//! let shape = Shape::new(1, 8, 8);
//! let codeword = vec![0.1; shape.len()];
//!
//! let mut rng = ChaCha20Rng::from_seed([7u8; 32]);
//! let basis = random_basis(shape.len(), &mut rng).unwrap();
//! let field = sample(&codeword, shape, &mut rng).unwrap();
//!
//! // ... embed `field` into a carrier, later extract a statistic `z` ...
//! let z = basis.project(field.data()).unwrap();
//! let posteriors = recover_posteriors(&z, Some(&basis), Some(&Variances::Uniform(2.0))).unwrap();
//! assert!(posteriors.iter().all(|p| (-1.0..=1.0).contains(p)));
//! ```

pub mod basis;
pub mod error;
pub mod fft;
pub mod field;
pub mod math;
pub mod posterior;
pub mod sampler;

pub use basis::{random_basis, Basis, ORTHO_TOL};
pub use error::{Result, SignalError};
pub use field::{Field, Shape};
pub use math::erf;
pub use posterior::{recover_posteriors, Variances, DEFAULT_VARIANCE};
pub use sampler::{sample, sample_batch, sample_projected};
