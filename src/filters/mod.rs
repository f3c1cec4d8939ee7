//! 3x3 convolution filters.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Description |
//! |--------|-------|------|-------------|
//! | Grayscale8 | (H, W, 1) | u8 | Single luminance channel, 0-255 |
//! | Grayscale+alpha8 | (H, W, 2) | u8 | Luminance and alpha, 0-255 |
//! | RGB8 | (H, W, 3) | u8 | Red, green, blue, 0-255 |
//! | RGBA8 | (H, W, 4) | u8 | RGB + alpha, 0-255 |
//!
//! Every channel is filtered independently with the same kernel.
//!
//! ## Architecture
//!
//! - **kernel** - Named weight matrices (edge, sharpen, blur, gauss, emboss, identity)
//! - **sampler** - One output byte from a clamp-to-edge 3x3 neighborhood
//! - **schedule** - Splits the image rows into one contiguous range per worker
//! - **convolve** - Runs the sampler over every range on a rayon pool and joins

pub mod kernel;
pub mod sampler;
pub mod schedule;
pub mod convolve;

pub use convolve::{convolve_serial, convolve_u8, convolve_with_options, ConvolveOptions};
pub use kernel::{lookup, FilterKind, Kernel};
