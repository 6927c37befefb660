// Copyright (c) 2026 Gaussmark Contributors
// SPDX-License-Identifier: GPL-3.0-only

//! 2D FFT/IFFT over a single height × width plane, plus centering shifts.
//!
//! Row FFTs run in place on the contiguous row slices; column FFTs use
//! gather-FFT-scatter with a single column buffer instead of a transposed
//! copy. Plans come from `rustfft`, which handles arbitrary (non-power-of-2)
//! lengths. All data is `Complex64`: the sampler's output feeds a posterior
//! computation that is sensitive to cancellation near zero, so the whole
//! pipeline stays in double precision.

use num_complex::Complex64;
use rustfft::FftPlanner;

/// 2D complex spectrum of a real plane.
#[derive(Clone, Debug)]
pub struct Spectrum {
    pub data: Vec<Complex64>,
    pub width: usize,
    pub height: usize,
}

/// Real-valued plane -> 2D complex spectrum.
///
/// The input is a row-major f64 array of size `width * height`. Unnormalized
/// (DC bin holds the plane's sum).
pub fn fft2(plane: &[f64], width: usize, height: usize) -> Spectrum {
    assert_eq!(plane.len(), width * height);

    let mut data: Vec<Complex64> = plane.iter().map(|&v| Complex64::new(v, 0.0)).collect();

    let mut planner = FftPlanner::<f64>::new();
    let row_fft = planner.plan_fft_forward(width);
    let col_fft = planner.plan_fft_forward(height);

    // FFT each row in place
    for row in data.chunks_exact_mut(width) {
        row_fft.process(row);
    }

    // FFT each column via gather-FFT-scatter
    let mut col_buf = vec![Complex64::new(0.0, 0.0); height];
    for col in 0..width {
        for r in 0..height {
            col_buf[r] = data[r * width + col];
        }
        col_fft.process(&mut col_buf);
        for r in 0..height {
            data[r * width + col] = col_buf[r];
        }
    }

    Spectrum { data, width, height }
}

/// 2D complex spectrum -> real-valued plane.
///
/// Takes the real parts after the inverse FFT, normalized by
/// `1/(width*height)`.
pub fn ifft2_real(spectrum: &Spectrum) -> Vec<f64> {
    let width = spectrum.width;
    let height = spectrum.height;
    let mut data = spectrum.data.clone();

    let mut planner = FftPlanner::<f64>::new();
    let row_fft = planner.plan_fft_inverse(width);
    let col_fft = planner.plan_fft_inverse(height);

    for row in data.chunks_exact_mut(width) {
        row_fft.process(row);
    }

    let mut col_buf = vec![Complex64::new(0.0, 0.0); height];
    for col in 0..width {
        for r in 0..height {
            col_buf[r] = data[r * width + col];
        }
        col_fft.process(&mut col_buf);
        for r in 0..height {
            data[r * width + col] = col_buf[r];
        }
    }

    let norm = 1.0 / (width * height) as f64;
    data.iter().map(|c| c.re * norm).collect()
}

/// Roll both axes so that the zero-frequency bin lands at
/// `(height/2, width/2)` — the centered-spectrum convention.
pub fn fftshift(spectrum: &mut Spectrum) {
    let dr = spectrum.height / 2;
    let dc = spectrum.width / 2;
    roll(spectrum, dr, dc);
}

/// Undo [`fftshift`]. Exact inverse for odd and even sizes.
pub fn ifftshift(spectrum: &mut Spectrum) {
    let dr = (spectrum.height - spectrum.height / 2) % spectrum.height;
    let dc = (spectrum.width - spectrum.width / 2) % spectrum.width;
    roll(spectrum, dr, dc);
}

/// Circularly shift the plane down by `dr` rows and right by `dc` columns.
fn roll(spectrum: &mut Spectrum, dr: usize, dc: usize) {
    if dr == 0 && dc == 0 {
        return;
    }
    let w = spectrum.width;
    let h = spectrum.height;
    let mut rolled = vec![Complex64::new(0.0, 0.0); spectrum.data.len()];
    for r in 0..h {
        let nr = (r + dr) % h;
        for c in 0..w {
            let nc = (c + dc) % w;
            rolled[nr * w + nc] = spectrum.data[r * w + c];
        }
    }
    spectrum.data = rolled;
}
