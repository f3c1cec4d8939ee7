//! Image file I/O.
//!
//! - `load_image`: decode any format the `image` crate understands into a
//!   (height, width, channels) `u8` array, keeping the file's channel count.
//! - `save_png`: encode a (height, width, channels) `u8` array as PNG.
use std::path::Path;

use image::{ColorType, DynamicImage, ImageFormat};
use ndarray::{Array3, ArrayView3};

use crate::error::FilterError;

/// Load an image from disk as 8-bit interleaved samples.
///
/// Grayscale, grayscale+alpha, RGB and RGBA files keep 1, 2, 3 and 4
/// channels. Higher bit depths are reduced to 8 bits.
pub fn load_image(path: &Path) -> Result<Array3<u8>, FilterError> {
    let img = image::open(path).map_err(|source| FilterError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    dynamic_to_array(img)
}

/// Convert a decoded image into a (height, width, channels) array.
pub fn dynamic_to_array(img: DynamicImage) -> Result<Array3<u8>, FilterError> {
    let width = img.width() as usize;
    let height = img.height() as usize;
    let channels = img.color().channel_count() as usize;

    let data = match channels {
        1 => img.into_luma8().into_raw(),
        2 => img.into_luma_alpha8().into_raw(),
        3 => img.into_rgb8().into_raw(),
        4 => img.into_rgba8().into_raw(),
        n => return Err(FilterError::UnsupportedChannels(n)),
    };

    Ok(Array3::from_shape_vec((height, width, channels), data)?)
}

/// Pixel layout the PNG encoder should use for `channels` samples per pixel.
fn color_type(channels: usize) -> Result<ColorType, FilterError> {
    match channels {
        1 => Ok(ColorType::L8),
        2 => Ok(ColorType::La8),
        3 => Ok(ColorType::Rgb8),
        4 => Ok(ColorType::Rgba8),
        n => Err(FilterError::UnsupportedChannels(n)),
    }
}

/// Save an image as PNG regardless of the path's extension.
pub fn save_png(path: &Path, image: ArrayView3<u8>) -> Result<(), FilterError> {
    let (height, width, channels) = image.dim();
    let color = color_type(channels)?;
    let data: Vec<u8> = image.iter().copied().collect();

    image::save_buffer_with_format(
        path,
        &data,
        width as u32,
        height as u32,
        color,
        ImageFormat::Png,
    )
    .map_err(|source| FilterError::Save {
        path: path.to_path_buf(),
        source,
    })
}
