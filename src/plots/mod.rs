//! High-level plot types.

mod heatmap;

pub use heatmap::{Heatmap, Origin};
