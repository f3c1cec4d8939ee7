//! Parallel 3x3 convolution engine.
//!
//! The destination buffer is split into disjoint row bands, one per worker.
//! Each worker reads only the shared source image and writes only its own
//! band, so no locking is needed and the output does not depend on how many
//! workers ran or in which order they finished.
//!
//! ## Supported Formats
//!
//! Any (height, width, channels) `u8` image. Every channel, alpha included,
//! is convolved independently with the same kernel.

use std::num::NonZeroUsize;

use log::{debug, warn};
use ndarray::{Array3, ArrayView3};
use rayon::ThreadPoolBuilder;

use super::kernel::Kernel;
use super::sampler::sample_pixel;
use super::schedule::{partition_rows, RowRange};
use crate::error::FilterError;

/// Tuning knobs for [`convolve_with_options`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvolveOptions {
    /// Worker count override. `None` uses the available hardware parallelism.
    pub workers: Option<usize>,
}

impl ConvolveOptions {
    pub fn with_workers(workers: usize) -> Self {
        Self {
            workers: Some(workers),
        }
    }

    /// Worker count to request from the scheduler (at least 1).
    pub fn resolve_workers(&self) -> usize {
        self.workers.unwrap_or_else(available_workers).max(1)
    }
}

/// Number of processing units the OS reports, or 1 if unknown.
pub fn available_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

/// Convolve an image with `kernel` using one worker per available core.
///
/// # Arguments
/// * `input` - Image with shape (height, width, channels)
/// * `kernel` - 3x3 weights
///
/// # Returns
/// New image with the same shape as `input`
pub fn convolve_u8(input: ArrayView3<u8>, kernel: &Kernel) -> Result<Array3<u8>, FilterError> {
    convolve_with_options(input, kernel, ConvolveOptions::default())
}

/// Convolve an image with `kernel`, splitting rows across worker threads.
///
/// A fresh thread pool is built for the call, one thread per row range, and
/// every worker is joined before returning. If the task list cannot be
/// allocated the whole image is convolved on the calling thread instead;
/// the result is identical either way.
///
/// # Errors
/// [`FilterError::WorkerSpawn`] if the worker threads cannot be started.
pub fn convolve_with_options(
    input: ArrayView3<u8>,
    kernel: &Kernel,
    options: ConvolveOptions,
) -> Result<Array3<u8>, FilterError> {
    let (height, width, channels) = input.dim();
    if height == 0 || width == 0 || channels == 0 {
        return Ok(Array3::zeros((height, width, channels)));
    }

    let ranges = partition_rows(height, options.resolve_workers());
    if ranges.len() == 1 {
        return Ok(convolve_serial(input, kernel));
    }

    let stride = width * channels;
    let mut data = vec![0u8; height * stride];

    let mut tasks: Vec<(RowRange, &mut [u8])> = Vec::new();
    if tasks.try_reserve_exact(ranges.len()).is_err() {
        warn!(
            "Failed to allocate {} convolution tasks, falling back to serial execution",
            ranges.len()
        );
        return Ok(convolve_serial(input, kernel));
    }

    let mut rest = data.as_mut_slice();
    for range in ranges {
        let (band, tail) = std::mem::take(&mut rest).split_at_mut(range.len() * stride);
        tasks.push((range, band));
        rest = tail;
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(tasks.len())
        .thread_name(|i| format!("convolve-{i}"))
        .build()?;

    debug!(
        "Convolving {}x{}x{} image with {} workers",
        width,
        height,
        channels,
        tasks.len()
    );

    pool.scope(|scope| {
        for (range, band) in tasks {
            scope.spawn(move |_| fill_rows(input, kernel, range, band));
        }
    });

    Ok(Array3::from_shape_vec((height, width, channels), data)?)
}

/// Convolve the whole image on the calling thread.
pub fn convolve_serial(input: ArrayView3<u8>, kernel: &Kernel) -> Array3<u8> {
    Array3::from_shape_fn(input.dim(), |(y, x, c)| sample_pixel(input, x, y, c, kernel))
}

/// Fill `band`, the destination bytes for `range`, row by row.
fn fill_rows(input: ArrayView3<u8>, kernel: &Kernel, range: RowRange, band: &mut [u8]) {
    let (_, width, channels) = input.dim();
    let stride = width * channels;

    for (y, line) in range.rows().zip(band.chunks_exact_mut(stride)) {
        for x in 0..width {
            for c in 0..channels {
                line[x * channels + c] = sample_pixel(input, x, y, c, kernel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::kernel::{lookup, FilterKind};
    use ndarray::s;

    /// Deterministic pseudo-random image (xorshift).
    fn noise_image(height: usize, width: usize, channels: usize, seed: u32) -> Array3<u8> {
        let mut state = seed.max(1);
        Array3::from_shape_fn((height, width, channels), |_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
    }

    #[test]
    fn test_identity_4x4_example() {
        let img = Array3::from_shape_vec((4, 4, 1), (1..=16).collect()).unwrap();
        let result = convolve_with_options(img.view(), &Kernel::identity(), ConvolveOptions::with_workers(3)).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_box_blur_uniform_3x3_example() {
        let img = Array3::from_elem((3, 3, 1), 100u8);
        let result = convolve_with_options(img.view(), &lookup("blur"), ConvolveOptions::with_workers(2)).unwrap();
        assert!(result.iter().all(|&v| v == 100));
    }

    #[test]
    fn test_identity_invariance_rgba() {
        let img = noise_image(23, 17, 4, 7);
        let result = convolve_u8(img.view(), &lookup("identity")).unwrap();
        assert_eq!(result, img);
    }

    #[test]
    fn test_dimensions_preserved() {
        for channels in 1..=4 {
            let img = noise_image(9, 13, channels, 3);
            for kind in FilterKind::ALL {
                let result = convolve_u8(img.view(), &kind.kernel()).unwrap();
                assert_eq!(result.dim(), (9, 13, channels));
            }
        }
    }

    #[test]
    fn test_result_independent_of_worker_count() {
        let img = noise_image(37, 29, 3, 42);
        for kind in FilterKind::ALL {
            let kernel = kind.kernel();
            let reference =
                convolve_with_options(img.view(), &kernel, ConvolveOptions::with_workers(1)).unwrap();
            for workers in [2, 3, 4, 7, 16, 37, 64] {
                let result =
                    convolve_with_options(img.view(), &kernel, ConvolveOptions::with_workers(workers))
                        .unwrap();
                assert_eq!(result, reference, "{kind} differs with {workers} workers");
            }
        }
    }

    #[test]
    fn test_parallel_matches_serial() {
        let img = noise_image(31, 11, 2, 9);
        let kernel = lookup("sharpen");
        let serial = convolve_serial(img.view(), &kernel);
        let parallel = convolve_with_options(img.view(), &kernel, ConvolveOptions::with_workers(5)).unwrap();
        assert_eq!(parallel, serial);
    }

    #[test]
    fn test_uniform_image_unchanged_by_gaussian() {
        // Gaussian weights are exact binary fractions, so no rounding loss
        for value in [0u8, 1, 37, 128, 200, 255] {
            let img = Array3::from_elem((8, 6, 3), value);
            let result = convolve_with_options(img.view(), &lookup("gauss"), ConvolveOptions::with_workers(4)).unwrap();
            assert!(result.iter().all(|&v| v == value), "value {value}");
        }
    }

    #[test]
    fn test_uniform_image_box_blur_within_rounding() {
        for value in 0..=255u8 {
            let img = Array3::from_elem((4, 5, 1), value);
            let result = convolve_with_options(img.view(), &lookup("blur"), ConvolveOptions::with_workers(2)).unwrap();
            assert!(result.iter().all(|&v| v.abs_diff(value) <= 1), "value {value}");
        }
    }

    #[test]
    fn test_edge_filter_flat_image_is_black() {
        let img = Array3::from_elem((5, 5, 3), 180u8);
        let result = convolve_u8(img.view(), &lookup("edge")).unwrap();
        assert!(result.iter().all(|&v| v == 0));
    }

    #[test]
    fn test_more_workers_than_rows() {
        let img = noise_image(2, 50, 1, 5);
        let kernel = lookup("emboss");
        let result = convolve_with_options(img.view(), &kernel, ConvolveOptions::with_workers(32)).unwrap();
        assert_eq!(result, convolve_serial(img.view(), &kernel));
    }

    #[test]
    fn test_non_contiguous_view() {
        let img = noise_image(20, 20, 3, 11);
        let view = img.slice(s![..;2, 1..;3, ..]);
        let kernel = lookup("gauss");
        let result = convolve_with_options(view, &kernel, ConvolveOptions::with_workers(3)).unwrap();
        assert_eq!(result, convolve_serial(view, &kernel));
        assert_eq!(result.dim(), view.dim());
    }

    #[test]
    fn test_empty_image() {
        let img = Array3::<u8>::zeros((0, 4, 3));
        let result = convolve_u8(img.view(), &lookup("blur")).unwrap();
        assert_eq!(result.dim(), (0, 4, 3));
    }

    #[test]
    fn test_resolve_workers() {
        assert_eq!(ConvolveOptions::with_workers(0).resolve_workers(), 1);
        assert_eq!(ConvolveOptions::with_workers(6).resolve_workers(), 6);
        assert!(ConvolveOptions::default().resolve_workers() >= 1);
    }
}
