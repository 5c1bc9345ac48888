//! matrix-heatmap: render a numeric text matrix as a `hot` heat-map.
//!
//! Run: `matrix-heatmap` (reads `mandelbrot.txt`, writes `mandelbrot.png`, shows it)

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use matrix_heatmap::config::Config;
use matrix_heatmap::pipeline::Pipeline;
use matrix_heatmap::plots::Origin;
use matrix_heatmap::scale::{Normalization, Palette};
use matrix_heatmap::viewer::ViewerMode;

/// Render a 2D numeric text matrix as a heat-map PNG and show it
#[derive(Parser, Debug)]
#[command(name = "matrix-heatmap")]
#[command(author = "PAIML Team")]
#[command(version)]
#[command(about = "Render a numeric text matrix as a heat-map PNG", long_about = None)]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input matrix file [default: mandelbrot.txt]
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output PNG file [default: mandelbrot.png]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Color palette (hot, greyscale, viridis, magma, blues, red_blue)
    #[arg(long)]
    palette: Option<Palette>,

    /// Value mapped to the lowest color
    #[arg(long, allow_negative_numbers = true)]
    vmin: Option<f32>,

    /// Value mapped to the highest color
    #[arg(long, allow_negative_numbers = true)]
    vmax: Option<f32>,

    /// Logarithmic normalisation
    #[arg(long)]
    log_norm: bool,

    /// Where row 0 is drawn (upper, lower)
    #[arg(long)]
    origin: Option<Origin>,

    /// Pixels per cell
    #[arg(long)]
    scale: Option<u32>,

    /// Viewer (auto, window, terminal, none)
    #[arg(long)]
    viewer: Option<ViewerMode>,

    /// Do not show the image (same as --viewer none)
    #[arg(long, conflicts_with = "viewer")]
    no_show: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: Level,
}

impl Cli {
    /// Apply command line overrides on top of the file/default configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input.clone_from(input);
        }
        if let Some(output) = &self.output {
            config.output.clone_from(output);
        }
        if let Some(palette) = self.palette {
            config.render.palette = palette;
        }
        if self.vmin.is_some() {
            config.render.vmin = self.vmin;
        }
        if self.vmax.is_some() {
            config.render.vmax = self.vmax;
        }
        if self.log_norm {
            config.render.normalization = Normalization::Log;
        }
        if let Some(origin) = self.origin {
            config.render.origin = origin;
        }
        if let Some(scale) = self.scale {
            config.render.scale = scale;
        }
        if let Some(viewer) = self.viewer {
            config.viewer = viewer;
        }
        if self.no_show {
            config.viewer = ViewerMode::None;
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    // Only fails if a subscriber is already installed.
    let _ = tracing::subscriber::set_global_default(subscriber);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = Config::discover(cli.config.as_deref())?;
    cli.apply(&mut config);
    debug!(?config, "Effective configuration");

    Pipeline::new(config).run()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_keeps_defaults() {
        let cli = Cli::parse_from(["matrix-heatmap"]);
        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::parse_from([
            "matrix-heatmap",
            "-i",
            "grid.txt",
            "--palette",
            "viridis",
            "--vmin",
            "-1.5",
            "--log-norm",
            "--origin",
            "lower",
            "--scale",
            "3",
            "--no-show",
        ]);
        let mut config = Config::default();
        cli.apply(&mut config);

        assert_eq!(config.input, PathBuf::from("grid.txt"));
        assert_eq!(config.output, PathBuf::from("mandelbrot.png"));
        assert_eq!(config.render.palette, Palette::Viridis);
        assert_eq!(config.render.vmin, Some(-1.5));
        assert_eq!(config.render.normalization, Normalization::Log);
        assert_eq!(config.render.origin, Origin::Lower);
        assert_eq!(config.render.scale, 3);
        assert_eq!(config.viewer, ViewerMode::None);
    }

    #[test]
    fn test_log_level() {
        let cli = Cli::parse_from(["matrix-heatmap"]);
        assert_eq!(cli.log_level, Level::WARN);
        let cli = Cli::parse_from(["matrix-heatmap", "--log-level", "DEBUG"]);
        assert_eq!(cli.log_level, Level::DEBUG);
        assert!(Cli::try_parse_from(["matrix-heatmap", "--log-level", "verbose"]).is_err());
    }

    #[test]
    fn test_invalid_origin_rejected() {
        assert!(Cli::try_parse_from(["matrix-heatmap", "--origin", "middle"]).is_err());
    }

    #[test]
    fn test_invalid_palette_rejected() {
        assert!(Cli::try_parse_from(["matrix-heatmap", "--palette", "jet"]).is_err());
    }

    #[test]
    fn test_no_show_conflicts_with_viewer() {
        assert!(Cli::try_parse_from(["matrix-heatmap", "--no-show", "--viewer", "terminal"])
            .is_err());
    }
}
