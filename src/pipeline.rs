//! Load, render, save, show.
//!
//! # Example
//!
//! ```no_run
//! use matrix_heatmap::prelude::*;
//!
//! let report = Pipeline::new(Config::default()).run()?;
//! println!("{}x{} -> {}", report.width, report.height, report.output.display());
//! # Ok::<(), matrix_heatmap::Error>(())
//! ```

use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::loader::load_matrix;
use crate::matrix::Matrix;
use crate::output::PngEncoder;
use crate::plots::Heatmap;

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Matrix rows.
    pub rows: usize,
    /// Matrix columns.
    pub cols: usize,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Finite `(min, max)` of the data, if any cell was finite.
    pub extent: Option<(f32, f32)>,
    /// Where the PNG was written.
    pub output: PathBuf,
    /// Whether a viewer was shown.
    pub displayed: bool,
}

/// A configured heatmap run.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
}

impl Pipeline {
    /// Create a pipeline for `config`.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// The configuration this pipeline runs with.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Heatmap builder for `matrix` with the render settings applied.
    fn heatmap<'a>(&self, matrix: &'a Matrix) -> Result<Heatmap<'a>> {
        let render = &self.config.render;
        let mut heatmap = Heatmap::new(matrix)
            .palette(render.palette)
            .normalization(render.normalization)
            .vmin(render.vmin)
            .vmax(render.vmax)
            .origin(render.origin)
            .scale(render.scale);

        // A single explicit side keeps the scaled size of the other.
        if render.width.is_some() || render.height.is_some() {
            let (width, height) = heatmap.output_size()?;
            heatmap =
                heatmap.dimensions(render.width.unwrap_or(width), render.height.unwrap_or(height));
        }
        heatmap.build()
    }

    /// Load the input and render it, without writing or showing anything.
    ///
    /// # Errors
    ///
    /// Loader errors for the input file, render errors for the settings.
    pub fn render(&self) -> Result<(Matrix, Framebuffer)> {
        let matrix = load_matrix(&self.config.input, &self.config.loader)?;
        let fb = self.heatmap(&matrix)?.to_framebuffer()?;
        debug!(width = fb.width(), height = fb.height(), "Rendered heatmap");
        Ok((matrix, fb))
    }

    /// Run the whole pipeline.
    ///
    /// The PNG is saved before the viewer opens, so it exists even if the
    /// viewer fails or the process is killed while it is open. Nothing is
    /// written when loading or rendering fails.
    ///
    /// # Errors
    ///
    /// The first error of any step.
    pub fn run(&self) -> Result<RunReport> {
        let (matrix, fb) = self.render()?;
        let extent = matrix.extent();
        info!(
            path = %self.config.input.display(),
            rows = matrix.rows(),
            cols = matrix.cols(),
            ?extent,
            non_finite = matrix.non_finite_count(),
            "Loaded matrix"
        );

        PngEncoder::write_to_file(&fb, &self.config.output)?;
        info!(output = %self.config.output.display(), "Saved heatmap");

        let displayed = match self.config.viewer.open()? {
            Some(mut viewer) => {
                info!(viewer = %self.config.viewer.resolve(), "Showing heatmap");
                viewer.show(&fb, &self.title())?;
                true
            }
            None => false,
        };

        Ok(RunReport {
            rows: matrix.rows(),
            cols: matrix.cols(),
            width: fb.width(),
            height: fb.height(),
            extent,
            output: self.config.output.clone(),
            displayed,
        })
    }

    fn title(&self) -> String {
        self.config
            .input
            .file_name()
            .map_or_else(|| "matrix-heatmap".to_string(), |n| n.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::error::{Error, ErrorKind};
    use crate::viewer::ViewerMode;
    use std::fs;
    use std::path::Path;

    fn config_in(dir: &Path, text: &str) -> Config {
        let input = dir.join("input.txt");
        fs::write(&input, text).unwrap();
        Config {
            input,
            output: dir.join("out.png"),
            viewer: ViewerMode::None,
            ..Config::default()
        }
    }

    #[test]
    fn test_render_checkerboard() {
        let dir = tempfile::tempdir().unwrap();
        let (matrix, fb) = Pipeline::new(config_in(dir.path(), "0 1\n1 0\n")).render().unwrap();

        assert_eq!(matrix.shape(), (2, 2));
        assert_eq!(fb.get_pixel(0, 0), Some(Rgba::BLACK));
        assert_eq!(fb.get_pixel(1, 0), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(0, 1), Some(Rgba::WHITE));
        assert_eq!(fb.get_pixel(1, 1), Some(Rgba::BLACK));
        assert!(!dir.path().join("out.png").exists());
    }

    #[test]
    fn test_run_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let report = Pipeline::new(config_in(dir.path(), "1 2 3\n4 5 6\n")).run().unwrap();

        assert_eq!((report.rows, report.cols), (2, 3));
        assert_eq!((report.width, report.height), (3, 2));
        assert_eq!(report.extent, Some((1.0, 6.0)));
        assert!(!report.displayed);
        assert!(report.output.exists());
    }

    #[test]
    fn test_run_with_scale_and_single_dimension() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "1 2\n3 4\n");
        config.render.scale = 3;
        let report = Pipeline::new(config.clone()).run().unwrap();
        assert_eq!((report.width, report.height), (6, 6));

        config.render.width = Some(10);
        let report = Pipeline::new(config).run().unwrap();
        assert_eq!((report.width, report.height), (10, 6));
    }

    #[test]
    fn test_missing_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            input: dir.path().join("absent.txt"),
            output: dir.path().join("out.png"),
            viewer: ViewerMode::None,
            ..Config::default()
        };

        let err = Pipeline::new(config).run().unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert!(!dir.path().join("out.png").exists());
    }

    #[test]
    fn test_bad_bounds_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path(), "1 2\n");
        config.render.vmin = Some(5.0);
        config.render.vmax = Some(1.0);

        let err = Pipeline::new(config).run().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Render);
        assert!(!dir.path().join("out.png").exists());
    }

    #[test]
    fn test_title_is_input_file_name() {
        let pipeline = Pipeline::new(Config::default());
        assert_eq!(pipeline.title(), "mandelbrot.txt");
    }
}
