pub mod bmp;
pub mod codec_options;

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

pub use bmp::{Bitmap, BitmapHeader};
pub use codec_options::CodecOptions;

use crate::error::WhiteoutError;

pub trait Persist {
    fn save_as(&self, _: &Path) -> crate::Result<()>;
}

/// The raw pixel array of a carrier, one byte per colour channel sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelPlane {
    bytes: Vec<u8>,
    bits_per_pixel: u16,
}

impl PixelPlane {
    pub fn new(bytes: Vec<u8>, bits_per_pixel: u16) -> Self {
        Self {
            bytes,
            bits_per_pixel,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bits_per_pixel(&self) -> u16 {
        self.bits_per_pixel
    }

    /// Distance in bytes to the same channel of the previous pixel, at least 1.
    pub fn stride(&self) -> usize {
        usize::from(self.bits_per_pixel / 8).max(1)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Replaces `target` with `data` in one step: the data goes to a temporary file
/// next to the target which is then renamed over it. Readers see either the old
/// or the complete new file.
pub(crate) fn write_atomically(target: &Path, data: &[u8]) -> crate::Result<()> {
    let dir = target
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file =
        NamedTempFile::new_in(dir).map_err(|source| WhiteoutError::WriteError { source })?;
    file.write_all(data)
        .map_err(|source| WhiteoutError::WriteError { source })?;
    file.persist(target)
        .map_err(|e| WhiteoutError::WriteError { source: e.error })?;

    Ok(())
}
