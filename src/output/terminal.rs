//! Terminal output encoder (ASCII/Unicode/ANSI).
//!
//! Renders framebuffers to terminal-compatible text output.
//! Supports multiple rendering modes:
//! - ASCII: Uses characters like ` .:-=+*#%@` for grayscale
//! - Unicode: Uses half-block characters (▀) for 2x vertical resolution
//! - ANSI: Full-cell 24-bit background colors
//!
//! Sampling is nearest-neighbour, so heatmap cells stay sharp when the image
//! is shrunk or enlarged to fit the terminal.

use std::fmt::Write as FmtWrite;

use crate::color::Rgba;
use crate::framebuffer::Framebuffer;

/// Terminal rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TerminalMode {
    /// ASCII grayscale characters (widest compatibility)
    Ascii,
    /// Unicode half-block characters (2x vertical resolution)
    #[default]
    UnicodeHalfBlock,
    /// Space characters with ANSI 24-bit background color
    AnsiTrueColor,
}

/// Terminal encoder configuration.
#[derive(Debug, Clone)]
pub struct TerminalEncoder {
    mode: TerminalMode,
    width: Option<u32>,
    height: Option<u32>,
    max_width: u32,
    background: Rgba,
}

impl Default for TerminalEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalEncoder {
    /// ASCII grayscale ramp from dark to light (10 levels).
    const ASCII_RAMP: &'static [char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

    /// Create a new terminal encoder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: TerminalMode::default(),
            width: None,
            height: None,
            max_width: 80,
            background: Rgba::BLACK,
        }
    }

    /// Set the rendering mode.
    #[must_use]
    pub fn mode(mut self, mode: TerminalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the target width in characters.
    #[must_use]
    pub fn width(mut self, width: u32) -> Self {
        self.width = Some(width.max(1));
        self
    }

    /// Set the target height in lines.
    #[must_use]
    pub fn height(mut self, height: u32) -> Self {
        self.height = Some(height.max(1));
        self
    }

    /// Cap on the automatic width (default 80 characters).
    #[must_use]
    pub fn max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width.max(1);
        self
    }

    /// Color that transparent pixels are composited over.
    #[must_use]
    pub fn background(mut self, color: Rgba) -> Self {
        self.background = color;
        self
    }

    /// Render a framebuffer to a string.
    #[must_use]
    pub fn render(&self, fb: &Framebuffer) -> String {
        match self.mode {
            TerminalMode::Ascii => self.render_ascii(fb),
            TerminalMode::UnicodeHalfBlock => self.render_half_block(fb),
            TerminalMode::AnsiTrueColor => self.render_true_color(fb),
        }
    }

    fn render_ascii(&self, fb: &Framebuffer) -> String {
        let (w, h) = self.compute_dimensions(fb, 2.0);
        let mut out = String::with_capacity((w as usize + 1) * h as usize);

        for y in 0..h {
            for x in 0..w {
                let luma = self.sample(fb, x, y, w, h).luminance();
                let idx = (luma * (Self::ASCII_RAMP.len() - 1) as f32).round() as usize;
                out.push(Self::ASCII_RAMP[idx.min(Self::ASCII_RAMP.len() - 1)]);
            }
            out.push('\n');
        }
        out
    }

    /// Each character covers two vertical samples: foreground paints the upper
    /// half (▀), background the lower.
    fn render_half_block(&self, fb: &Framebuffer) -> String {
        let (w, h) = self.compute_dimensions(fb, 1.0);
        let h = (h + 1) & !1;
        let mut out = String::with_capacity((w as usize * 40 + 5) * (h as usize / 2));

        for y in (0..h).step_by(2) {
            for x in 0..w {
                let top = self.sample(fb, x, y, w, h);
                let bottom = self.sample(fb, x, y + 1, w, h);
                let _ = write!(
                    out,
                    "\x1b[38;2;{};{};{}m\x1b[48;2;{};{};{}m▀",
                    top.r, top.g, top.b, bottom.r, bottom.g, bottom.b
                );
            }
            out.push_str("\x1b[0m\n");
        }
        out
    }

    fn render_true_color(&self, fb: &Framebuffer) -> String {
        let (w, h) = self.compute_dimensions(fb, 2.0);
        let mut out = String::with_capacity((w as usize * 20 + 5) * h as usize);

        for y in 0..h {
            for x in 0..w {
                let c = self.sample(fb, x, y, w, h);
                let _ = write!(out, "\x1b[48;2;{};{};{}m ", c.r, c.g, c.b);
            }
            out.push_str("\x1b[0m\n");
        }
        out
    }

    /// Target size in characters, preserving aspect ratio.
    /// `char_aspect` is how many samples tall a character cell is per sample wide.
    fn compute_dimensions(&self, fb: &Framebuffer, char_aspect: f32) -> (u32, u32) {
        let fb_aspect = fb.width() as f32 / fb.height() as f32;
        let height_for = |w: u32| ((w as f32 / fb_aspect / char_aspect).round() as u32).max(1);

        match (self.width, self.height) {
            (Some(w), Some(h)) => (w, h),
            (Some(w), None) => (w, height_for(w)),
            (None, Some(h)) => (((h as f32 * fb_aspect * char_aspect).round() as u32).max(1), h),
            (None, None) => {
                let w = self.max_width.min(fb.width());
                (w, height_for(w))
            }
        }
    }

    /// Nearest framebuffer pixel for output cell `(x, y)` of a `w × h` grid,
    /// composited over the background.
    fn sample(&self, fb: &Framebuffer, x: u32, y: u32, w: u32, h: u32) -> Rgba {
        let fx = (u64::from(x) * u64::from(fb.width()) / u64::from(w)) as u32;
        let fy = (u64::from(y) * u64::from(fb.height()) / u64::from(h)) as u32;
        let pixel = fb
            .get_pixel(fx.min(fb.width() - 1), fy.min(fb.height() - 1))
            .unwrap_or(self.background);
        self.background.lerp(pixel.with_alpha(255), f32::from(pixel.a) / 255.0)
    }
}
