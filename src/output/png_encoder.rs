//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};
use crate::framebuffer::Framebuffer;

/// PNG encoder for framebuffer output.
pub struct PngEncoder;

impl PngEncoder {
    /// Write a framebuffer to a PNG file, replacing any existing file.
    ///
    /// The image is written to a temporary file next to `path` and renamed
    /// over it, so a failed write never leaves a truncated file behind and an
    /// unwritable directory leaves the old file untouched.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] / [`Error::NotFound`] if the directory is missing or not
    /// writable or the existing file is read-only, [`Error::PngEncoding`] if
    /// encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(fb: &Framebuffer, path: P) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        // A rename would replace even a read-only file; refuse like a plain write would.
        if let Ok(meta) = fs::metadata(path) {
            if meta.permissions().readonly() {
                return Err(Error::io(path, io::Error::from(io::ErrorKind::PermissionDenied)));
            }
        }

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            Self::encode(&mut writer, fb)?;
            writer.flush().map_err(|e| Error::io(path, e))?;
        }

        // Temp files are created owner-only; match what a plain create would give.
        let permissions = match fs::metadata(path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => default_permissions(),
        };
        if let Some(permissions) = permissions {
            fs::set_permissions(tmp.path(), permissions).map_err(|e| Error::io(path, e))?;
        }

        tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
        debug!(path = %path.display(), width = fb.width(), height = fb.height(), "Wrote PNG");
        Ok(())
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::encode(&mut buffer, fb)?;
        Ok(buffer)
    }

    fn encode<W: Write>(out: W, fb: &Framebuffer) -> Result<()> {
        let mut encoder = png::Encoder::new(out, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header()?;
        // Use compact pixels to handle stride padding
        writer.write_image_data(&fb.to_compact_pixels())?;
        writer.finish()?;
        Ok(())
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}
