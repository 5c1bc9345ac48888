//! Configuration for a heatmap run.
//!
//! Supports YAML configuration with precedence: CLI > file > defaults. The
//! command line layer lives in the binary; this module covers the file and
//! the defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::loader::LoaderOptions;
use crate::plots::Origin;
use crate::scale::{Normalization, Palette};
use crate::viewer::ViewerMode;

/// File name looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "matrix-heatmap.yaml";

/// Rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Color palette.
    pub palette: Palette,
    /// Value normalisation.
    pub normalization: Normalization,
    /// Lower bound; defaults to the data minimum.
    pub vmin: Option<f32>,
    /// Upper bound; defaults to the data maximum.
    pub vmax: Option<f32>,
    /// Where matrix row 0 is drawn.
    pub origin: Origin,
    /// Pixels per cell along each axis.
    pub scale: u32,
    /// Explicit image width in pixels.
    pub width: Option<u32>,
    /// Explicit image height in pixels.
    pub height: Option<u32>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            palette: Palette::default(),
            normalization: Normalization::default(),
            vmin: None,
            vmax: None,
            origin: Origin::default(),
            scale: 1,
            width: None,
            height: None,
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Matrix text file to read.
    #[serde(default = "default_input")]
    pub input: PathBuf,

    /// PNG file to write.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// How to show the result.
    #[serde(default)]
    pub viewer: ViewerMode,

    /// Input parsing.
    #[serde(default)]
    pub loader: LoaderOptions,

    /// Image rendering.
    #[serde(default)]
    pub render: RenderConfig,
}

fn default_input() -> PathBuf {
    PathBuf::from("mandelbrot.txt")
}
fn default_output() -> PathBuf {
    PathBuf::from("mandelbrot.png")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            viewer: ViewerMode::default(),
            loader: LoaderOptions::default(),
            render: RenderConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// [`Error::ConfigNotFound`] if the file does not exist, [`Error::Io`] if it
    /// cannot be read and [`Error::ConfigParse`] if it is not valid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| match Error::io(path, e) {
            Error::NotFound { path } => Error::ConfigNotFound(path),
            other => other,
        })?;

        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// An empty document yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error with line number if parsing fails.
    pub fn parse(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map_or(0, |l| l.line());
            Error::ConfigParse { line, message: e.to_string() }
        })
    }

    /// Standard places a configuration file is looked for, in order.
    #[must_use]
    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("matrix-heatmap").join("config.yaml"));
        }
        paths
    }

    /// Find and load the configuration.
    ///
    /// An explicit path must exist. Without one, the first existing file of
    /// [`Config::search_paths`] is loaded, or the defaults if there is none.
    ///
    /// # Errors
    ///
    /// Everything [`Config::load`] returns.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        Self::discover_in(explicit, &Self::search_paths())
    }

    fn discover_in(explicit: Option<&Path>, candidates: &[PathBuf]) -> Result<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "Loading configuration");
            return Self::load(path);
        }
        match candidates.iter().find(|p| p.is_file()) {
            Some(path) => {
                debug!(path = %path.display(), "Loading configuration");
                Self::load(path)
            }
            None => {
                debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }
}
