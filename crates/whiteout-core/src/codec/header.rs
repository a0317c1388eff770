//! The fixed 12 byte control header.
//!
//! | bytes  | field                          |
//! |--------|--------------------------------|
//! | 0..7   | signature `#GIZLI#`            |
//! | 7      | bit depth of the payload, 1..8 |
//! | 8..12  | payload length, little endian  |
//!
//! The header always takes one bit per pixel, whatever the payload bit depth is.

use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, LittleEndian};
use byteorder::ByteOrder;

use super::{BitDepth, OccupancyMap};
use crate::error::WhiteoutError;
use crate::result::Result;

pub const SIGNATURE: &[u8; 7] = b"#GIZLI#";
pub const HEADER_LEN: usize = 12;
pub const HEADER_PIXELS: usize = HEADER_LEN * 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub bit_depth: BitDepth,
    /// Length of the obfuscated packet in bytes.
    pub length: u32,
}

impl Header {
    pub fn new(bit_depth: BitDepth, length: u32) -> Self {
        Self { bit_depth, length }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut bytes = [0u8; HEADER_LEN];
        bytes[..SIGNATURE.len()].copy_from_slice(SIGNATURE);
        bytes[7] = self.bit_depth.bits();
        byteorder::LittleEndian::write_u32(&mut bytes[8..], self.length);

        bytes
    }

    /// Validates the signature first, then the bit depth.
    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Result<Self> {
        if &bytes[..SIGNATURE.len()] != SIGNATURE {
            return Err(WhiteoutError::SignatureMismatch);
        }
        let bit_depth = BitDepth::new(bytes[7])?;
        let length = byteorder::LittleEndian::read_u32(&bytes[8..]);

        Ok(Self { bit_depth, length })
    }
}

/// Raw header bits read back from a plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRead {
    pub bytes: [u8; HEADER_LEN],
    /// The pixels the header was read from, in order.
    pub indices: Vec<usize>,
}

pub struct HeaderCodec;

impl HeaderCodec {
    /// Stores `header` bit by bit, LSB first, in the LSB of the first
    /// [`HEADER_PIXELS`] pixels of `order` and marks them taken.
    pub fn write(
        pixels: &mut [u8],
        order: &[usize],
        header: &[u8; HEADER_LEN],
        occupancy: &mut OccupancyMap,
    ) -> Result<()> {
        let slots = header_slots(order)?;
        let mut bits = BitReader::endian(&header[..], LittleEndian);

        for &idx in slots {
            let bit = bits.read_bit()?;
            pixels[idx] = (pixels[idx] & !1) | u8::from(bit);
            occupancy.mark(idx);
        }

        Ok(())
    }

    /// Mirrors [`HeaderCodec::write`]. Always consumes [`HEADER_PIXELS`] entries,
    /// no matter whether the result carries a valid signature.
    pub fn read(pixels: &[u8], order: &[usize]) -> Result<HeaderRead> {
        let slots = header_slots(order)?;
        let mut bits = BitWriter::endian(Vec::with_capacity(HEADER_LEN), LittleEndian);

        for &idx in slots {
            bits.write_bit(pixels[idx] & 1 == 1)?;
        }

        let mut bytes = [0u8; HEADER_LEN];
        bytes.copy_from_slice(&bits.into_writer());

        Ok(HeaderRead {
            bytes,
            indices: slots.to_vec(),
        })
    }
}

fn header_slots(order: &[usize]) -> Result<&[usize]> {
    order
        .get(..HEADER_PIXELS)
        .ok_or(WhiteoutError::CapacityExceeded {
            required: HEADER_PIXELS,
            available: order.len(),
        })
}
