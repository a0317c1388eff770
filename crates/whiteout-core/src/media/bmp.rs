//! Uncompressed BMP carrier.
//!
//! Only the parts needed to reach the pixel array are interpreted: the 14 byte
//! file header and the 40 byte info header. Whatever sits between the headers
//! and the pixel array (palettes, larger info headers) is kept verbatim.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use log::debug;

use super::{write_atomically, Persist, PixelPlane};
use crate::error::WhiteoutError;
use crate::result::Result;

/// "BM"
pub const BMP_FILE_TYPE: u16 = 0x4D42;
pub const BMP_HEADER_LEN: usize = 14 + 40;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapHeader {
    pub file_type: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub offset_data: u32,
    pub size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bit_count: u16,
    pub compression: u32,
    pub size_image: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
}

impl BitmapHeader {
    pub fn read_from<R: Read>(r: &mut R) -> std::io::Result<Self> {
        Ok(Self {
            file_type: r.read_u16::<LittleEndian>()?,
            file_size: r.read_u32::<LittleEndian>()?,
            reserved1: r.read_u16::<LittleEndian>()?,
            reserved2: r.read_u16::<LittleEndian>()?,
            offset_data: r.read_u32::<LittleEndian>()?,
            size: r.read_u32::<LittleEndian>()?,
            width: r.read_i32::<LittleEndian>()?,
            height: r.read_i32::<LittleEndian>()?,
            planes: r.read_u16::<LittleEndian>()?,
            bit_count: r.read_u16::<LittleEndian>()?,
            compression: r.read_u32::<LittleEndian>()?,
            size_image: r.read_u32::<LittleEndian>()?,
            x_pixels_per_meter: r.read_i32::<LittleEndian>()?,
            y_pixels_per_meter: r.read_i32::<LittleEndian>()?,
            colors_used: r.read_u32::<LittleEndian>()?,
            colors_important: r.read_u32::<LittleEndian>()?,
        })
    }

    pub fn write_to<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        w.write_u16::<LittleEndian>(self.file_type)?;
        w.write_u32::<LittleEndian>(self.file_size)?;
        w.write_u16::<LittleEndian>(self.reserved1)?;
        w.write_u16::<LittleEndian>(self.reserved2)?;
        w.write_u32::<LittleEndian>(self.offset_data)?;
        w.write_u32::<LittleEndian>(self.size)?;
        w.write_i32::<LittleEndian>(self.width)?;
        w.write_i32::<LittleEndian>(self.height)?;
        w.write_u16::<LittleEndian>(self.planes)?;
        w.write_u16::<LittleEndian>(self.bit_count)?;
        w.write_u32::<LittleEndian>(self.compression)?;
        w.write_u32::<LittleEndian>(self.size_image)?;
        w.write_i32::<LittleEndian>(self.x_pixels_per_meter)?;
        w.write_i32::<LittleEndian>(self.y_pixels_per_meter)?;
        w.write_u32::<LittleEndian>(self.colors_used)?;
        w.write_u32::<LittleEndian>(self.colors_important)
    }
}

/// A BMP file split into header, the bytes up to the pixel array and the pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    header: BitmapHeader,
    gap: Vec<u8>,
    pixels: PixelPlane,
}

impl Bitmap {
    pub fn open(path: &Path) -> Result<Self> {
        let data = fs::read(path).map_err(|source| WhiteoutError::ReadError { source })?;
        let bitmap = Self::from_bytes(&data)?;
        debug!(
            "opened {}: {}x{} at {} bpp, {} pixel bytes",
            path.display(),
            bitmap.header.width,
            bitmap.header.height,
            bitmap.header.bit_count,
            bitmap.pixels.len()
        );

        Ok(bitmap)
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < BMP_HEADER_LEN {
            return Err(WhiteoutError::InvalidBitmap("file is shorter than the headers"));
        }
        let mut cursor = Cursor::new(data);
        let header = BitmapHeader::read_from(&mut cursor)?;
        if header.file_type != BMP_FILE_TYPE {
            return Err(WhiteoutError::InvalidBitmap("missing BM signature"));
        }

        let offset = header.offset_data as usize;
        if offset < BMP_HEADER_LEN || offset > data.len() {
            return Err(WhiteoutError::InvalidBitmap("pixel data offset out of range"));
        }
        let size = if header.size_image == 0 {
            header
                .file_size
                .checked_sub(header.offset_data)
                .ok_or(WhiteoutError::InvalidBitmap("file size below pixel data offset"))?
                as usize
        } else {
            header.size_image as usize
        };
        let pixels = data
            .get(offset..offset + size)
            .ok_or(WhiteoutError::InvalidBitmap("pixel array is truncated"))?;

        Ok(Self {
            gap: data[BMP_HEADER_LEN..offset].to_vec(),
            pixels: PixelPlane::new(pixels.to_vec(), header.bit_count),
            header,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut data = Vec::with_capacity(BMP_HEADER_LEN + self.gap.len() + self.pixels.len());
        self.header.write_to(&mut data)?;
        data.extend_from_slice(&self.gap);
        data.extend_from_slice(self.pixels.as_bytes());

        Ok(data)
    }

    pub fn header(&self) -> &BitmapHeader {
        &self.header
    }

    pub fn pixels(&self) -> &PixelPlane {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelPlane {
        &mut self.pixels
    }
}

impl Persist for Bitmap {
    /// The bitmap is serialised completely before anything touches the disk.
    fn save_as(&self, path: &Path) -> Result<()> {
        let data = self.to_bytes()?;
        write_atomically(path, &data)?;
        debug!("saved {} ({} bytes)", path.display(), data.len());

        Ok(())
    }
}
