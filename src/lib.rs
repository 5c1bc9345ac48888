//! # matrix-heatmap
//!
//! Render a 2D numeric text matrix as a heat-map image, save it as PNG and show it.
//!
//! The pipeline has four steps: read the matrix from a delimited text file,
//! map every cell through a color palette (default `hot`, nearest-neighbour, one
//! pixel per cell), write the PNG and open a viewer.
//!
//! ## Features
//!
//! - **Pure Rust**: PNG encoding without libpng, no Python or plotting runtime
//! - **Sharp cells**: nearest-neighbour mapping, no smoothing between cells
//! - **Safe output**: the PNG is replaced atomically, never left half-written
//! - **Headless friendly**: terminal preview or no viewer at all
//!
//! ## Quick Start
//!
//! ```rust
//! use matrix_heatmap::prelude::*;
//!
//! let matrix = parse_matrix("0 1\n1 0\n", &LoaderOptions::default())?;
//! let fb = Heatmap::new(&matrix).palette(Palette::Hot).build()?.to_framebuffer()?;
//!
//! assert_eq!(fb.get_pixel(0, 0), Some(Rgba::BLACK));
//! assert_eq!(fb.get_pixel(1, 0), Some(Rgba::WHITE));
//! # Ok::<(), matrix_heatmap::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `window`: native window viewer (`minifb`)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
// Allow common patterns in graphics/visualization code
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color types.
pub mod color;

/// Core framebuffer for pixel rendering.
pub mod framebuffer;

/// Rectangular numeric grid.
pub mod matrix;

/// Normalisation and color palettes.
pub mod scale;

// ============================================================================
// Pipeline Modules
// ============================================================================

/// Delimited text input.
pub mod loader;

/// Heatmap rendering.
pub mod plots;

/// Output encoders (PNG, terminal).
pub mod output;

/// Interactive display.
pub mod viewer;

/// Configuration file and defaults.
pub mod config;

/// Load, render, save, show.
pub mod pipeline;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for matrix-heatmap operations.
pub mod error;

pub use error::{Error, ErrorKind, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust
/// use matrix_heatmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::Rgba;
    pub use crate::config::{Config, RenderConfig};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::framebuffer::Framebuffer;
    pub use crate::loader::{load_matrix, parse_matrix, LoaderOptions};
    pub use crate::matrix::Matrix;
    pub use crate::output::{PngEncoder, TerminalEncoder, TerminalMode};
    pub use crate::pipeline::{Pipeline, RunReport};
    pub use crate::plots::{Heatmap, Origin};
    pub use crate::scale::{ColorScale, LinearScale, LogScale, Normalization, Palette, Scale};
    pub use crate::viewer::{Viewer, ViewerMode};
}
