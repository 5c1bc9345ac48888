//! Terminal viewer: prints an ANSI preview and waits for a key press.

use std::io::{self, Write};

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use tracing::debug;

use super::Viewer;
use crate::error::Result;
use crate::framebuffer::Framebuffer;
use crate::output::{TerminalEncoder, TerminalMode};

/// Lines kept free below the image for the title and the prompt.
const RESERVED_LINES: u16 = 2;

/// Shows the image as half-block characters sized to the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalViewer;

impl TerminalViewer {
    /// Create a terminal viewer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build the encoder for a terminal of `cols × lines` characters.
    fn encoder_for(self, fb: &Framebuffer, cols: u16, lines: u16) -> TerminalEncoder {
        let encoder =
            TerminalEncoder::new().mode(TerminalMode::UnicodeHalfBlock).max_width(u32::from(cols));

        // Half blocks pack two image rows per line.
        let usable = u32::from(lines.saturating_sub(RESERVED_LINES).max(1));
        let width = u32::from(cols).min(fb.width()).max(1);
        let aspect = fb.height() as f32 / fb.width() as f32;
        let wanted_lines = (width as f32 * aspect / 2.0).ceil() as u32;

        if wanted_lines > usable {
            let height = usable * 2;
            let width = ((height as f32 / aspect) as u32).clamp(1, u32::from(cols));
            encoder.width(width).height(height)
        } else {
            encoder
        }
    }
}

impl Viewer for TerminalViewer {
    fn show(&mut self, fb: &Framebuffer, title: &str) -> Result<()> {
        let (cols, lines) = terminal::size().unwrap_or((80, 24));
        let text = self.encoder_for(fb, cols, lines).render(fb);

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{title} ({}x{})", fb.width(), fb.height())?;
        stdout.write_all(text.as_bytes())?;
        write!(stdout, "press any key to close")?;
        stdout.flush()?;
        drop(stdout);

        debug!(cols, lines, "Waiting for key press");
        wait_for_key()?;
        println!();
        Ok(())
    }
}

/// Restores cooked mode when dropped, including on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

fn wait_for_key() -> io::Result<()> {
    let _guard = RawModeGuard::enable()?;
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;

    fn image(w: u32, h: u32) -> Framebuffer {
        let mut fb = Framebuffer::new(w, h).unwrap();
        fb.clear(Rgba::RED);
        fb
    }

    #[test]
    fn test_small_image_fits_unchanged() {
        let fb = image(4, 4);
        let text = TerminalViewer::new().encoder_for(&fb, 80, 24).render(&fb);
        // 4 columns wide, 4 rows packed into 2 lines.
        assert_eq!(text.lines().count(), 2);
        assert_eq!(text.lines().next().map(|l| l.matches('▀').count()), Some(4));
    }

    #[test]
    fn test_wide_image_capped_to_columns() {
        let fb = image(400, 10);
        let text = TerminalViewer::new().encoder_for(&fb, 50, 40).render(&fb);
        assert!(text.lines().all(|l| l.matches('▀').count() <= 50));
    }

    #[test]
    fn test_tall_image_capped_to_lines() {
        let fb = image(100, 1000);
        let text = TerminalViewer::new().encoder_for(&fb, 120, 30).render(&fb);
        assert!(text.lines().count() <= 28);
    }
}
