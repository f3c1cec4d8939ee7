//! Named 3x3 convolution kernels.
//!
//! The table is fixed at compile time. Lookup by name is total: anything
//! that is not a known filter name resolves to the identity kernel, which
//! copies the image unchanged.

use std::fmt;

/// A 3x3 matrix of weights.
///
/// Row 0 weighs the neighbors above the center pixel, row 1 the center row
/// and row 2 the neighbors below. Columns run left to right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    pub weights: [[f64; 3]; 3],
}

impl Kernel {
    pub const fn new(weights: [[f64; 3]; 3]) -> Self {
        Self { weights }
    }

    /// Kernel that reproduces its input exactly.
    pub const fn identity() -> Self {
        IDENTITY
    }

    /// Sum of all nine weights.
    ///
    /// Kernels summing to 1.0 leave uniform regions unchanged.
    pub fn weight_sum(&self) -> f64 {
        self.weights.iter().flatten().sum()
    }
}

impl Default for Kernel {
    fn default() -> Self {
        IDENTITY
    }
}

const EDGE: Kernel = Kernel::new([[0.0, -1.0, 0.0], [-1.0, 4.0, -1.0], [0.0, -1.0, 0.0]]);

const SHARPEN: Kernel = Kernel::new([[0.0, -1.0, 0.0], [-1.0, 5.0, -1.0], [0.0, -1.0, 0.0]]);

const BOX_BLUR: Kernel = Kernel::new([
    [1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0],
    [1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0],
    [1.0 / 9.0, 1.0 / 9.0, 1.0 / 9.0],
]);

const GAUSSIAN_BLUR: Kernel = Kernel::new([
    [1.0 / 16.0, 1.0 / 8.0, 1.0 / 16.0],
    [1.0 / 8.0, 1.0 / 4.0, 1.0 / 8.0],
    [1.0 / 16.0, 1.0 / 8.0, 1.0 / 16.0],
]);

const EMBOSS: Kernel = Kernel::new([[-2.0, -1.0, 0.0], [-1.0, 1.0, 1.0], [0.0, 1.0, 2.0]]);

const IDENTITY: Kernel = Kernel::new([[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]);

/// The filters selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterKind {
    Edge,
    Sharpen,
    Blur,
    Gauss,
    Emboss,
    #[default]
    Identity,
}

impl FilterKind {
    /// Every filter, in the order they are listed in usage text.
    pub const ALL: [FilterKind; 6] = [
        FilterKind::Edge,
        FilterKind::Sharpen,
        FilterKind::Blur,
        FilterKind::Gauss,
        FilterKind::Emboss,
        FilterKind::Identity,
    ];

    /// Resolve a filter name. Unknown names map to [`FilterKind::Identity`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "edge" => FilterKind::Edge,
            "sharpen" => FilterKind::Sharpen,
            "blur" => FilterKind::Blur,
            "gauss" => FilterKind::Gauss,
            "emboss" => FilterKind::Emboss,
            _ => FilterKind::Identity,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Edge => "edge",
            FilterKind::Sharpen => "sharpen",
            FilterKind::Blur => "blur",
            FilterKind::Gauss => "gauss",
            FilterKind::Emboss => "emboss",
            FilterKind::Identity => "identity",
        }
    }

    pub fn kernel(self) -> Kernel {
        match self {
            FilterKind::Edge => EDGE,
            FilterKind::Sharpen => SHARPEN,
            FilterKind::Blur => BOX_BLUR,
            FilterKind::Gauss => GAUSSIAN_BLUR,
            FilterKind::Emboss => EMBOSS,
            FilterKind::Identity => IDENTITY,
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Kernel for a filter name; unknown names give the identity kernel.
pub fn lookup(name: &str) -> Kernel {
    FilterKind::from_name(name).kernel()
}
