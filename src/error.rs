//! Error type shared by the codec, the convolution engine and the CLI.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can stop a filtering run.
///
/// Running short of memory for worker bookkeeping is not listed here: the
/// engine recovers from it on the spot by convolving serially.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Wrong number of command-line arguments.
    #[error("expected exactly two arguments: <filename> <type>")]
    Usage,

    /// The input file could not be opened or decoded.
    #[error("failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The output file could not be encoded or written.
    #[error("failed to save {}: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Only 1 to 4 interleaved channels are supported.
    #[error("unsupported channel count {0}, expected 1 to 4")]
    UnsupportedChannels(usize),

    /// A flat buffer did not match the requested image shape.
    #[error("invalid image shape: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// The worker pool could not start its threads.
    #[error("failed to start convolution workers: {0}")]
    WorkerSpawn(#[from] rayon::ThreadPoolBuildError),
}
