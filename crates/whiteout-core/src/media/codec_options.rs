use crate::codec::BitDepth;

/// Codec configuration for hiding data
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Low bits per pixel used for the payload.
    ///
    /// Up to 5 bits the payload goes to the noisiest pixels of the image, above
    /// that the whole image is used in password order.
    /// Note this number influences the capacity directly.
    pub bit_depth: BitDepth,
}

impl CodecOptions {
    pub fn with_bit_depth(mut self, bit_depth: BitDepth) -> Self {
        self.bit_depth = bit_depth;
        self
    }
}
