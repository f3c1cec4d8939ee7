//! Per-pixel 3x3 convolution with clamp-to-edge borders.

use ndarray::ArrayView3;

use super::kernel::Kernel;

/// Compute one output byte for pixel `(x, y)` on `channel`.
///
/// Neighbors outside the image reuse the nearest edge pixel. The weighted
/// sum is accumulated in `f64`, clamped to 0-255 and truncated.
///
/// # Arguments
/// * `input` - Image with shape (height, width, channels)
/// * `x` - Column, `0..width`
/// * `y` - Row, `0..height`
/// * `channel` - Channel index, `0..channels`
/// * `kernel` - Weights to apply
#[inline]
pub fn sample_pixel(input: ArrayView3<u8>, x: usize, y: usize, channel: usize, kernel: &Kernel) -> u8 {
    let (height, width, _) = input.dim();

    let cols = [x.saturating_sub(1), x, (x + 1).min(width - 1)];
    let rows = [y.saturating_sub(1), y, (y + 1).min(height - 1)];

    let mut sum = 0.0f64;
    for (ky, &py) in rows.iter().enumerate() {
        for (kx, &px) in cols.iter().enumerate() {
            sum += kernel.weights[ky][kx] * input[[py, px, channel]] as f64;
        }
    }

    sum.clamp(0.0, 255.0) as u8
}
