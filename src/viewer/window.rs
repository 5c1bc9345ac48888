//! Native window viewer built on `minifb`.

use minifb::{Key, Scale, Window, WindowOptions};
use tracing::debug;

use super::Viewer;
use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;

/// Images smaller than this on their longest side are shown enlarged.
const MIN_WINDOW_SIDE: u32 = 256;

/// Shows the image in a window until it is closed or Escape is pressed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowViewer;

impl WindowViewer {
    /// Create a window viewer; transparent cells show black.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Largest power-of-two zoom keeping the window under `MIN_WINDOW_SIDE * 2`.
fn zoom_for(width: u32, height: u32) -> Scale {
    let longest = width.max(height).max(1);
    match MIN_WINDOW_SIDE / longest {
        0 | 1 => Scale::X1,
        2 | 3 => Scale::X2,
        4..=7 => Scale::X4,
        8..=15 => Scale::X8,
        16..=31 => Scale::X16,
        _ => Scale::X32,
    }
}

impl Viewer for WindowViewer {
    fn show(&mut self, fb: &Framebuffer, title: &str) -> Result<()> {
        let (w, h) = (fb.width() as usize, fb.height() as usize);
        let options = WindowOptions { scale: zoom_for(fb.width(), fb.height()), ..WindowOptions::default() };

        let mut window =
            Window::new(title, w, h, options).map_err(|e| Error::Viewer(e.to_string()))?;
        let pixels = fb.to_0rgb_pixels(Rgba::BLACK);
        debug!(width = w, height = h, "Opened window");

        while window.is_open() && !window.is_key_down(Key::Escape) {
            window.update_with_buffer(&pixels, w, h).map_err(|e| Error::Viewer(e.to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_for_small_images() {
        assert!(matches!(zoom_for(2, 2), Scale::X32));
        assert!(matches!(zoom_for(40, 10), Scale::X4));
        assert!(matches!(zoom_for(100, 100), Scale::X2));
        assert!(matches!(zoom_for(640, 480), Scale::X1));
    }
}
