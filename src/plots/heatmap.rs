//! Heatmap rendering of a [`Matrix`].
//!
//! Every cell is normalised, looked up in the palette's color table and painted
//! as a sharp-edged block: pixel `(x, y)` of a `width × height` image shows
//! cell `(y * rows / height, x * cols / width)`. There is no blending between
//! neighbouring cells.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;
use crate::matrix::Matrix;
use crate::scale::{Normalization, Normalizer, Palette};

/// Where matrix row 0 is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    /// Row 0 at the top (image convention).
    #[default]
    Upper,
    /// Row 0 at the bottom (plot convention).
    Lower,
}

impl Origin {
    /// Name as used in config files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Origin {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            _ => Err(format!("unknown origin '{s}', expected upper or lower")),
        }
    }
}

/// Builder for rendering a matrix as a heatmap.
#[derive(Debug, Clone)]
pub struct Heatmap<'a> {
    matrix: &'a Matrix,
    palette: Palette,
    normalization: Normalization,
    vmin: Option<f32>,
    vmax: Option<f32>,
    origin: Origin,
    scale: u32,
    dimensions: Option<(u32, u32)>,
    bad_color: Rgba,
}

impl<'a> Heatmap<'a> {
    /// Create a heatmap of `matrix` with the `hot` palette, one pixel per cell.
    #[must_use]
    pub fn new(matrix: &'a Matrix) -> Self {
        Self {
            matrix,
            palette: Palette::default(),
            normalization: Normalization::default(),
            vmin: None,
            vmax: None,
            origin: Origin::default(),
            scale: 1,
            dimensions: None,
            bad_color: Rgba::TRANSPARENT,
        }
    }

    /// Set the color palette.
    #[must_use]
    pub fn palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the normalisation.
    #[must_use]
    pub fn normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    /// Value mapped to the palette's first color. Defaults to the data minimum.
    #[must_use]
    pub fn vmin(mut self, vmin: Option<f32>) -> Self {
        self.vmin = vmin;
        self
    }

    /// Value mapped to the palette's last color. Defaults to the data maximum.
    #[must_use]
    pub fn vmax(mut self, vmax: Option<f32>) -> Self {
        self.vmax = vmax;
        self
    }

    /// Set which edge row 0 is drawn at.
    #[must_use]
    pub fn origin(mut self, origin: Origin) -> Self {
        self.origin = origin;
        self
    }

    /// Pixels per cell along each axis. Ignored when explicit dimensions are set.
    #[must_use]
    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Set explicit output dimensions.
    #[must_use]
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.dimensions = Some((width, height));
        self
    }

    /// Color for cells that cannot be normalised.
    #[must_use]
    pub fn bad_color(mut self, color: Rgba) -> Self {
        self.bad_color = color;
        self
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] for a zero scale, zero dimensions or an
    /// image too large for `u32`, and [`Error::ScaleDomain`] if the value
    /// bounds are unusable.
    pub fn build(self) -> Result<Self> {
        let (width, height) = self.output_size()?;
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        self.normalizer()?;
        Ok(self)
    }

    /// Output size in pixels.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDimensions`] if `cells * scale` overflows `u32` or the
    /// scale is zero.
    pub fn output_size(&self) -> Result<(u32, u32)> {
        if let Some(dims) = self.dimensions {
            return Ok(dims);
        }
        let overflow = || Error::InvalidDimensions {
            width: self.matrix.cols().min(u32::MAX as usize) as u32,
            height: self.matrix.rows().min(u32::MAX as usize) as u32,
        };
        if self.scale == 0 {
            return Err(Error::InvalidDimensions { width: 0, height: 0 });
        }
        let width = u32::try_from(self.matrix.cols())
            .ok()
            .and_then(|c| c.checked_mul(self.scale))
            .ok_or_else(overflow)?;
        let height = u32::try_from(self.matrix.rows())
            .ok()
            .and_then(|r| r.checked_mul(self.scale))
            .ok_or_else(overflow)?;
        Ok((width, height))
    }

    /// The `(vmin, vmax)` pair actually used for normalisation.
    #[must_use]
    pub fn bounds(&self) -> (f32, f32) {
        let extent = match self.normalization {
            Normalization::Linear => self.matrix.extent(),
            Normalization::Log => self.matrix.positive_extent(),
        };
        match (self.vmin, self.vmax, extent) {
            (Some(lo), Some(hi), _) => (lo, hi),
            (Some(lo), None, Some((_, hi))) => (lo, hi),
            (None, Some(hi), Some((lo, _))) => (lo, hi),
            (None, None, Some(extent)) => extent,
            (Some(v), None, None) | (None, Some(v), None) => (v, v),
            // Nothing normalisable; every cell is drawn with the bad color.
            (None, None, None) => (1.0, 1.0),
        }
    }

    fn normalizer(&self) -> Result<Normalizer> {
        Normalizer::new(self.normalization, self.bounds())
    }

    /// Color of every cell, row-major.
    ///
    /// # Errors
    ///
    /// [`Error::ScaleDomain`] if the value bounds are unusable.
    pub fn cell_colors(&self) -> Result<Vec<Rgba>> {
        let norm = self.normalizer()?;
        let lut = self.palette.lut();
        Ok(self
            .matrix
            .as_slice()
            .iter()
            .map(|&v| norm.normalize(v).map_or(self.bad_color, |t| lut.lookup(t)))
            .collect())
    }

    /// Render into an existing framebuffer, stretching the matrix over it.
    ///
    /// # Errors
    ///
    /// [`Error::ScaleDomain`] if the value bounds are unusable.
    pub fn render(&self, fb: &mut Framebuffer) -> Result<()> {
        let colors = self.cell_colors()?;
        let (rows, cols) = self.matrix.shape();
        let (width, height) = (u64::from(fb.width()), u64::from(fb.height()));

        // Source column for each output x; shared by every row.
        let col_of: Vec<usize> =
            (0..width).map(|x| (x * cols as u64 / width) as usize).collect();

        for y in 0..fb.height() {
            let mut row = (u64::from(y) * rows as u64 / height) as usize;
            if self.origin == Origin::Lower {
                row = rows - 1 - row;
            }
            let cells = &colors[row * cols..(row + 1) * cols];

            if let Some(pixels) = fb.row_mut(y) {
                for (chunk, &col) in pixels.chunks_exact_mut(4).zip(&col_of) {
                    chunk.copy_from_slice(&cells[col].to_array());
                }
            }
        }

        Ok(())
    }

    /// Render to a new framebuffer of [`Heatmap::output_size`].
    ///
    /// # Errors
    ///
    /// Returns an error if the size or bounds are invalid.
    pub fn to_framebuffer(&self) -> Result<Framebuffer> {
        let (width, height) = self.output_size()?;
        let mut fb = Framebuffer::new(width, height)?;
        self.render(&mut fb)?;
        Ok(fb)
    }
}
