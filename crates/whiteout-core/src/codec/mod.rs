//! The pixel plane codec.
//!
//! Data is placed in two regions of the same plane:
//! - the control [`header`] always lives in the LSB of 96 pixels picked by the
//!   password seeded global order
//! - the [`payload`] is packed with the configured [`BitDepth`] into pixels of the
//!   adaptive candidate pool, skipping whatever the header already owns

pub mod capacity;
pub mod header;
pub mod occupancy;
pub mod payload;
pub mod permutation;

use std::fmt::{self, Display, Formatter};

use crate::error::WhiteoutError;
use crate::result::Result;

pub use capacity::Scored;
pub use header::{Header, HeaderCodec, HEADER_LEN, HEADER_PIXELS, SIGNATURE};
pub use occupancy::OccupancyMap;
pub use payload::{Completion, PayloadCodec};
pub use permutation::Permutation;

/// Value written to every consumed pixel after an unveil.
pub const WHITEOUT: u8 = 255;

/// Number of low bits per pixel that carry payload data, always within 1..=8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BitDepth(u8);

impl BitDepth {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 8;
    /// Up to this depth the body goes into the noisiest pixels first.
    pub const ADAPTIVE_THRESHOLD: u8 = 5;

    pub fn new(bits: u8) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(WhiteoutError::InvalidBitDepth(bits))
        }
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// Mask of the bits that carry payload data.
    pub fn low_mask(self) -> u8 {
        low_mask(self.0)
    }

    /// Mask of the bits that are never touched by the payload.
    pub fn high_mask(self) -> u8 {
        !self.low_mask()
    }

    pub fn is_adaptive(self) -> bool {
        self.0 <= Self::ADAPTIVE_THRESHOLD
    }

    /// Pixels needed to store `bytes` at this depth.
    pub fn pixels_for(self, bytes: usize) -> usize {
        bytes.saturating_mul(8).div_ceil(self.0 as usize)
    }
}

impl Default for BitDepth {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u8> for BitDepth {
    type Error = WhiteoutError;

    fn try_from(bits: u8) -> Result<Self> {
        Self::new(bits)
    }
}

impl Display for BitDepth {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mask with the lowest `bits` bits set, `bits` within 0..=8.
pub(crate) fn low_mask(bits: u8) -> u8 {
    ((1u16 << bits) - 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_reject_bit_depths_outside_of_range() {
        assert!(matches!(
            BitDepth::new(0),
            Err(WhiteoutError::InvalidBitDepth(0))
        ));
        assert!(matches!(
            BitDepth::try_from(9),
            Err(WhiteoutError::InvalidBitDepth(9))
        ));
        for bits in 1..=8 {
            assert_eq!(BitDepth::new(bits).unwrap().bits(), bits);
        }
    }

    #[test]
    fn should_provide_masks() {
        let one = BitDepth::new(1).unwrap();
        assert_eq!(one.low_mask(), 0b0000_0001);
        assert_eq!(one.high_mask(), 0b1111_1110);

        let eight = BitDepth::new(8).unwrap();
        assert_eq!(eight.low_mask(), 0xff);
        assert_eq!(eight.high_mask(), 0);
    }

    #[test]
    fn should_switch_off_adaptivity_above_5_bits() {
        assert!(BitDepth::new(5).unwrap().is_adaptive());
        assert!(!BitDepth::new(6).unwrap().is_adaptive());
    }

    #[test]
    fn should_round_up_required_pixels() {
        assert_eq!(BitDepth::new(1).unwrap().pixels_for(8), 64);
        assert_eq!(BitDepth::new(3).unwrap().pixels_for(2), 6);
        assert_eq!(BitDepth::new(5).unwrap().pixels_for(1), 2);
        assert_eq!(BitDepth::new(8).unwrap().pixels_for(0), 0);
    }
}
