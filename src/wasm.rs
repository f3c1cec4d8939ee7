//! WebAssembly exports for the convolution filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Browsers give
//! no worker threads to a plain wasm module, so convolution runs serially
//! here; the output is the same as the threaded path.

use ndarray::ArrayView3;
use wasm_bindgen::prelude::*;

use crate::filters::convolve::convolve_serial;
use crate::filters::kernel::FilterKind;

/// Apply a named 3x3 convolution filter.
///
/// # Arguments
/// * `data` - Flat array of interleaved bytes (length = width * height * channels)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `channels` - Samples per pixel (1-4)
/// * `filter` - edge, sharpen, blur, gauss, emboss or identity
///
/// # Returns
/// Flat array of filtered bytes with the same layout
#[wasm_bindgen]
pub fn convolve_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    channels: usize,
    filter: &str,
) -> Result<Vec<u8>, JsValue> {
    if !(1..=4).contains(&channels) {
        return Err(JsValue::from_str(&format!(
            "unsupported channel count {channels}, expected 1 to 4"
        )));
    }

    let input = ArrayView3::from_shape((height, width, channels), data)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let kernel = FilterKind::from_name(filter).kernel();
    let result = convolve_serial(input, &kernel);
    Ok(result.into_raw_vec_and_offset().0)
}

/// Names accepted by `convolve_wasm`, comma separated.
#[wasm_bindgen]
pub fn filter_names_wasm() -> String {
    FilterKind::ALL
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(",")
}
