// Copyright (c) 2026 Gaussmark Contributors
// SPDX-License-Identifier: GPL-3.0-only

//! Shapes and shaped real-valued arrays.
//!
//! A [`Field`] is an owned `f64` buffer tagged with a channels × height ×
//! width [`Shape`]. Codewords, noise fields, and pseudogaussian samples all
//! share this layout; the Fourier transform operates on the height × width
//! planes channel by channel. All buffers are row-major within a channel,
//! channels stored contiguously.

use crate::error::{Result, SignalError};

/// Dimensions of a spatial-domain array: channels × height × width.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    pub channels: usize,
    pub height: usize,
    pub width: usize,
}

impl Shape {
    pub fn new(channels: usize, height: usize, width: usize) -> Self {
        Shape { channels, height, width }
    }

    /// Total element count, `channels * height * width`.
    pub fn len(&self) -> usize {
        self.channels * self.height * self.width
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Elements per channel plane.
    pub fn plane_len(&self) -> usize {
        self.height * self.width
    }
}

/// An owned real-valued array of a fixed [`Shape`].
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    shape: Shape,
    data: Vec<f64>,
}

impl Field {
    /// Wrap a flat buffer as a shaped field.
    ///
    /// The buffer is reshaped, never resampled: its length must equal the
    /// shape's element count exactly.
    pub fn from_vec(data: Vec<f64>, shape: Shape) -> Result<Self> {
        if data.len() != shape.len() {
            return Err(SignalError::ShapeMismatch {
                expected: shape.len(),
                actual: data.len(),
            });
        }
        Ok(Field { shape, data })
    }

    /// An all-zero field of the given shape.
    pub fn zeros(shape: Shape) -> Self {
        Field { shape, data: vec![0.0; shape.len()] }
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// The whole buffer, channel-major row-major.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// One channel's height × width plane.
    pub fn channel(&self, c: usize) -> &[f64] {
        let plane = self.shape.plane_len();
        &self.data[c * plane..(c + 1) * plane]
    }

    /// Mutable view of one channel's plane.
    pub fn channel_mut(&mut self, c: usize) -> &mut [f64] {
        let plane = self.shape.plane_len();
        &mut self.data[c * plane..(c + 1) * plane]
    }

    /// Consume the field, returning the flat buffer.
    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }
}
