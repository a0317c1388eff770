//! Packet layout and the variable bit depth body codec.
//!
//! A packet is `name ++ 0x00 ++ content`, obfuscated with the password
//! keystream. It is packed LSB first into the low `bit_depth` bits of the free
//! pixels of the candidate pool.

use std::fmt::{self, Display, Formatter};

use bitstream_io::{BitRead, BitReader, BitWrite, BitWriter, LittleEndian};

use super::{low_mask, BitDepth, OccupancyMap};
use crate::error::WhiteoutError;
use crate::password::Password;
use crate::result::Result;

/// Separates the file name from the content inside a packet.
pub const SEPARATOR: u8 = 0x00;

/// Builds the obfuscated packet for `name` and `content`.
pub fn pack(name: &str, content: &[u8], password: &Password) -> Vec<u8> {
    let mut packet = Vec::with_capacity(name.len() + 1 + content.len());
    packet.extend_from_slice(name.as_bytes());
    packet.push(SEPARATOR);
    packet.extend_from_slice(content);
    password.apply_keystream(&mut packet);

    packet
}

/// Splits a de-obfuscated packet at the first separator.
///
/// A packet without separator, or one ending right at the separator, is
/// [`WhiteoutError::MalformedPacket`].
pub fn unpack(mut packet: Vec<u8>) -> Result<(String, Vec<u8>)> {
    let split = packet
        .iter()
        .position(|&b| b == SEPARATOR)
        .filter(|&pos| pos + 1 < packet.len())
        .ok_or(WhiteoutError::MalformedPacket)?;

    let content = packet.split_off(split + 1);
    packet.truncate(split);

    Ok((String::from_utf8_lossy(&packet).into_owned(), content))
}

/// Whether a packet made it completely through the candidate pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Complete,
    /// The pool ran out, only `stored` of `expected` bytes fit.
    Truncated { stored: usize, expected: usize },
}

impl Completion {
    pub fn new(stored: usize, expected: usize) -> Self {
        if stored >= expected {
            Completion::Complete
        } else {
            Completion::Truncated { stored, expected }
        }
    }

    pub fn is_truncated(&self) -> bool {
        matches!(self, Completion::Truncated { .. })
    }
}

impl Display for Completion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Completion::Complete => write!(f, "complete"),
            Completion::Truncated { stored, expected } => {
                write!(f, "truncated, {stored} of {expected} bytes")
            }
        }
    }
}

/// Outcome of [`PayloadCodec::write`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyWrite {
    pub indices: Vec<usize>,
    pub bits: usize,
}

impl BodyWrite {
    /// Whole bytes that were stored.
    pub fn stored_bytes(&self) -> usize {
        self.bits / 8
    }
}

/// Outcome of [`PayloadCodec::read`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyRead {
    /// Whole bytes only, a trailing partial byte of a truncated body is dropped.
    pub bytes: Vec<u8>,
    pub indices: Vec<usize>,
}

#[derive(Debug, Clone, Copy)]
pub struct PayloadCodec {
    bit_depth: BitDepth,
}

impl PayloadCodec {
    pub fn new(bit_depth: BitDepth) -> Self {
        Self { bit_depth }
    }

    /// Packs `packet` into the free pixels of `pool`.
    ///
    /// Taken pixels are skipped without consuming packet bits. Body pixels are
    /// not marked, the pool never repeats an index. Stops at the end of the
    /// packet or the end of the pool, whichever comes first.
    pub fn write(
        &self,
        pixels: &mut [u8],
        pool: &[usize],
        occupancy: &OccupancyMap,
        packet: &[u8],
    ) -> Result<BodyWrite> {
        let depth = self.bit_depth.bits() as usize;
        let total = packet.len() * 8;
        let mut source = BitReader::endian(packet, LittleEndian);
        let mut written = 0;
        let mut indices = Vec::new();

        for &idx in pool.iter().filter(|&&idx| !occupancy.is_taken(idx)) {
            if written == total {
                break;
            }
            let chunk = depth.min(total - written);
            let value: u8 = source.read(chunk as u32)?;
            pixels[idx] = (pixels[idx] & self.bit_depth.high_mask()) | value;

            written += chunk;
            indices.push(idx);
        }

        Ok(BodyWrite {
            indices,
            bits: written,
        })
    }

    /// Mirrors [`PayloadCodec::write`], reading up to `length` bytes.
    pub fn read(
        &self,
        pixels: &[u8],
        pool: &[usize],
        occupancy: &OccupancyMap,
        length: usize,
    ) -> Result<BodyRead> {
        let depth = self.bit_depth.bits() as usize;
        let total = length.saturating_mul(8);
        let capacity = length.min(pool.len());
        let mut sink = BitWriter::endian(Vec::with_capacity(capacity), LittleEndian);
        let mut read = 0;
        let mut indices = Vec::new();

        for &idx in pool.iter().filter(|&&idx| !occupancy.is_taken(idx)) {
            if read == total {
                break;
            }
            let chunk = depth.min(total - read);
            sink.write(chunk as u32, pixels[idx] & low_mask(chunk as u8))?;

            read += chunk;
            indices.push(idx);
        }

        sink.byte_align()?;
        let mut bytes = sink.into_writer();
        bytes.truncate(read / 8);

        Ok(BodyRead { bytes, indices })
    }
}
