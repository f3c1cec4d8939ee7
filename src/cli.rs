//! Command-line front end: `image <filename> <type>`.
//!
//! Loads the input, applies the named filter and always writes
//! `output.png` in the working directory.

use std::path::PathBuf;

use log::info;

use crate::codec::{load_image, save_png};
use crate::error::FilterError;
use crate::filters::convolve::{convolve_with_options, ConvolveOptions};
use crate::filters::kernel::FilterKind;

/// Where the filtered image is written.
pub const OUTPUT_PATH: &str = "output.png";

/// Process exit status for usage, load and save failures.
pub const EXIT_FAILURE: i32 = -1;

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub input: PathBuf,
    pub filter: FilterKind,
    pub output: PathBuf,
}

impl Invocation {
    /// Parse the arguments that follow the program name.
    ///
    /// Exactly two are accepted: the input file and the filter name. An
    /// unknown filter name selects the identity filter.
    pub fn from_args<I>(args: I) -> Result<Self, FilterError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut args = args.into_iter();
        let (Some(input), Some(filter), None) = (args.next(), args.next(), args.next()) else {
            return Err(FilterError::Usage);
        };

        Ok(Self {
            input: PathBuf::from(input),
            filter: FilterKind::from_name(&filter),
            output: PathBuf::from(OUTPUT_PATH),
        })
    }
}

/// Usage text listing every filter name.
pub fn usage() -> String {
    let names: Vec<&str> = FilterKind::ALL.iter().map(|k| k.name()).collect();
    format!(
        "Usage: image <filename> <type>\n\twhere type is one of ({})\n",
        names.join(",")
    )
}

/// Load, filter and save according to `invocation`.
pub fn run(invocation: &Invocation, options: ConvolveOptions) -> Result<(), FilterError> {
    let source = load_image(&invocation.input)?;
    let (height, width, channels) = source.dim();
    info!(
        "Loaded {} ({}x{}, {} channels), applying {} filter",
        invocation.input.display(),
        width,
        height,
        channels,
        invocation.filter
    );
    info!("Using {} threads.", options.resolve_workers().min(height.max(1)));

    let filtered = convolve_with_options(source.view(), &invocation.filter.kernel(), options)?;
    save_png(&invocation.output, filtered.view())?;

    info!("Wrote {}", invocation.output.display());
    Ok(())
}
