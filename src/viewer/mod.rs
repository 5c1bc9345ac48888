//! Interactive display of a rendered heatmap.
//!
//! Every viewer blocks until the user dismisses it.

use std::fmt;
use std::str::FromStr;

use crossterm::tty::IsTty;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::framebuffer::Framebuffer;

mod terminal;
#[cfg(feature = "window")]
mod window;

pub use terminal::TerminalViewer;
#[cfg(feature = "window")]
pub use window::WindowViewer;

/// Something that can show a framebuffer to the user.
pub trait Viewer {
    /// Display `fb` and block until the user closes the view.
    fn show(&mut self, fb: &Framebuffer, title: &str) -> Result<()>;
}

/// Which viewer to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewerMode {
    /// Window if built with the `window` feature and a display is available,
    /// else terminal if stdout is a terminal, else nothing.
    #[default]
    Auto,
    /// Native window (`window` feature).
    Window,
    /// ANSI preview in the terminal.
    Terminal,
    /// Headless: do not display.
    None,
}

impl ViewerMode {
    /// All modes, in declaration order.
    pub const ALL: [Self; 4] = [Self::Auto, Self::Window, Self::Terminal, Self::None];

    /// Name as used in config files and on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Window => "window",
            Self::Terminal => "terminal",
            Self::None => "none",
        }
    }

    /// Resolve [`ViewerMode::Auto`] against the build and the environment.
    #[must_use]
    pub fn resolve(self) -> Self {
        let window = cfg!(feature = "window") && display_available();
        self.resolve_with(window, std::io::stdout().is_tty())
    }

    fn resolve_with(self, window: bool, tty: bool) -> Self {
        match self {
            Self::Auto if window => Self::Window,
            Self::Auto if tty => Self::Terminal,
            Self::Auto => Self::None,
            other => other,
        }
    }

    /// Create the viewer for this mode, or `None` when headless.
    ///
    /// # Errors
    ///
    /// [`crate::Error::Viewer`] if a window is requested but the crate was built
    /// without the `window` feature.
    pub fn open(self) -> Result<Option<Box<dyn Viewer>>> {
        match self.resolve() {
            Self::Terminal => Ok(Some(Box::new(TerminalViewer::new()))),
            Self::Window => open_window(),
            Self::None | Self::Auto => Ok(None),
        }
    }
}

/// Whether a window system is reachable.
#[cfg(all(unix, not(target_os = "macos")))]
fn display_available() -> bool {
    ["DISPLAY", "WAYLAND_DISPLAY"]
        .iter()
        .any(|var| std::env::var_os(var).is_some_and(|v| !v.is_empty()))
}

#[cfg(not(all(unix, not(target_os = "macos"))))]
fn display_available() -> bool {
    true
}

#[cfg(feature = "window")]
fn open_window() -> Result<Option<Box<dyn Viewer>>> {
    Ok(Some(Box::new(WindowViewer::new())))
}

#[cfg(not(feature = "window"))]
fn open_window() -> Result<Option<Box<dyn Viewer>>> {
    Err(crate::error::Error::Viewer(
        "window viewer not available; rebuild with --features window".to_string(),
    ))
}

impl fmt::Display for ViewerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewerMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|m| m.name() == wanted).ok_or_else(|| {
            format!("unknown viewer '{s}', expected one of: auto, window, terminal, none")
        })
    }
}
