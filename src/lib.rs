pub mod core;
pub mod plot_area;
pub mod render;
pub mod runtime;
pub mod sample;
pub mod scale;
pub mod wasm_api;

use std::fmt;

/// Failure categories for every fallible operation in the crate.
///
/// Details (offending values, selectors, parse errors) travel as the
/// `error_stack` report chain rather than inside the variant.
#[derive(Debug, Clone, PartialEq)]
pub enum PlotError {
    /// Chart configuration cannot produce a drawable surface.
    InvalidConfig(String),
    /// A domain or interval is empty, reversed into nothing, or non-finite.
    InvalidDomain { min: f64, max: f64 },
    /// Too few samples for the requested sampler.
    InvalidSampleCount { n: usize, min: usize },
    /// A layer name is already taken by a layer of another shape.
    LayerKindMismatch { name: String },
    /// The mount target could not be resolved.
    ContainerNotFound(String),
    /// The mount target rejected the rendered surface.
    Mount,
}

impl fmt::Display for PlotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig(reason) => write!(f, "invalid plot configuration: {reason}"),
            Self::InvalidDomain { min, max } => write!(f, "invalid domain [{min}, {max}]"),
            Self::InvalidSampleCount { n, min } => {
                write!(f, "sample count {n} is below the minimum of {min}")
            }
            Self::LayerKindMismatch { name } => {
                write!(f, "layer `{name}` already exists with a different shape")
            }
            Self::ContainerNotFound(selector) => write!(f, "no container matches `{selector}`"),
            Self::Mount => write!(f, "failed to mount the surface"),
        }
    }
}

impl std::error::Error for PlotError {}

pub type Result<T> = std::result::Result<T, error_stack::Report<PlotError>>;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

pub mod prelude {
    pub use crate::core::*;
    pub use crate::plot_area::*;
    pub use crate::runtime::*;
    pub use crate::sample::*;
    pub use crate::scale::*;
    pub use crate::PlotError;
}
