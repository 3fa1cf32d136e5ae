pub mod axis;
pub mod components;
pub mod join;
pub mod path;
pub mod svg;

pub use axis::{Axis, Orient, Tick};
pub use components::*;
pub use join::{Join, join_marks, reconcile};
pub use svg::to_svg;
