//! Image Convolve
//!
//! Applies a fixed 3x3 convolution kernel (edge detect, sharpen, box blur,
//! gaussian blur, emboss or identity) to a raster image, spreading the rows
//! across worker threads. Python bindings via PyO3 and WASM bindings for
//! JavaScript are available behind the `python` and `wasm` features.
//!
//! ## Image Format
//! Images are `ndarray` arrays of shape (height, width, channels):
//! - **Grayscale**: (height, width, 1)
//! - **Grayscale + alpha**: (height, width, 2)
//! - **RGB**: (height, width, 3)
//! - **RGBA**: (height, width, 4)
//!
//! Samples are `u8` (0-255). In standard layout the bytes are row-major and
//! interleaved, so the offset of a sample is
//! `(row * width + col) * channels + channel`.
//!
//! ## Borders
//! Neighbors outside the image reuse the nearest edge pixel.

pub mod cli;
pub mod codec;
pub mod error;
pub mod filters;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::FilterError;
pub use filters::{convolve_u8, lookup, FilterKind, Kernel};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::{PyRuntimeError, PyValueError};
    use pyo3::prelude::*;

    use crate::error::FilterError;
    use crate::filters::convolve::{convolve_with_options, ConvolveOptions};
    use crate::filters::kernel::FilterKind;

    fn to_py_err(err: FilterError) -> PyErr {
        match err {
            FilterError::UnsupportedChannels(_) | FilterError::Shape(_) => {
                PyValueError::new_err(err.to_string())
            }
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }

    /// Apply a named 3x3 convolution filter.
    ///
    /// # Arguments
    /// * `image` - u8 image (height, width, channels)
    /// * `filter` - edge, sharpen, blur, gauss, emboss or identity; unknown names copy the image
    /// * `workers` - Worker thread count (default: one per core)
    #[pyfunction]
    #[pyo3(signature = (image, filter, workers=None))]
    pub fn convolve<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        filter: &str,
        workers: Option<usize>,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let input = image.as_array();
        let kernel = FilterKind::from_name(filter).kernel();
        let result = convolve_with_options(input, &kernel, ConvolveOptions { workers })
            .map_err(to_py_err)?;
        Ok(result.into_pyarray(py))
    }

    /// Names accepted by `convolve`.
    #[pyfunction]
    pub fn filter_names() -> Vec<&'static str> {
        FilterKind::ALL.iter().map(|k| k.name()).collect()
    }

    #[pymodule]
    pub fn image_convolve(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(convolve, m)?)?;
        m.add_function(wrap_pyfunction!(filter_names, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::image_convolve;
