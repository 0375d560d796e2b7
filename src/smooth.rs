//! Separable Gaussian smoothing for complex displacement fields.
//!
//! The tiled generator needs to blur a piecewise-constant complex field into
//! a continuous one. Real and imaginary channels are convolved with the same
//! 1-D kernels, so smoothing commutes with treating the field as two real
//! planes. Borders replicate the edge value, which keeps a constant field
//! exactly constant under smoothing.

use crate::Flow;
use ndarray::Array2;
use num_complex::Complex64;

/// Normalized 1-D Gaussian kernel for integer amplitude `sigma`.
///
/// Radius is `2 * sigma` (truncated tails are folded back in by the final
/// renormalization). `sigma == 0` yields the identity kernel `[1.0]`.
pub fn gaussian_kernel(sigma: usize) -> Vec<f64> {
    if sigma == 0 {
        return vec![1.0];
    }
    let radius = 2 * sigma;
    let s2 = (sigma * sigma) as f64;
    let mut kernel = Vec::with_capacity(2 * radius + 1);
    for i in 0..=2 * radius {
        let d = i as f64 - radius as f64;
        kernel.push((-d * d / (2.0 * s2)).exp());
    }
    let sum: f64 = kernel.iter().sum();
    for k in kernel.iter_mut() {
        *k /= sum;
    }
    kernel
}

/// Convolve one axis of a complex field with a 1-D kernel, replicate border.
///
/// `axis == 0` runs the kernel down columns (vertical), `axis == 1` across
/// rows (horizontal).
fn convolve_axis(field: &Flow, kernel: &[f64], axis: usize) -> Flow {
    let (h, w) = field.dim();
    if kernel.len() == 1 {
        return field.clone();
    }
    let radius = (kernel.len() / 2) as isize;
    let clamp = |i: isize, n: usize| -> usize { i.clamp(0, n as isize - 1) as usize };

    Array2::from_shape_fn((h, w), |(y, x)| {
        let mut acc = Complex64::new(0.0, 0.0);
        for (k, &wk) in kernel.iter().enumerate() {
            let off = k as isize - radius;
            let v = if axis == 0 {
                field[[clamp(y as isize + off, h), x]]
            } else {
                field[[y, clamp(x as isize + off, w)]]
            };
            acc += v * wk;
        }
        acc
    })
}

/// 2-D Gaussian blur of a complex field with per-axis amplitude
/// `(sigma_y, sigma_x)`.
///
/// Separable: a vertical pass followed by a horizontal pass. An amplitude of
/// zero along an axis leaves that axis untouched. The input is not modified.
pub fn gaussian_smooth(field: &Flow, amplitude: (usize, usize)) -> Flow {
    let (sigma_y, sigma_x) = amplitude;
    let ky = gaussian_kernel(sigma_y);
    let kx = gaussian_kernel(sigma_x);
    let vertical = convolve_axis(field, &ky, 0);
    convolve_axis(&vertical, &kx, 1)
}
