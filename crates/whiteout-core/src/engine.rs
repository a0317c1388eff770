//! The hide and unveil protocols.
//!
//! Hiding: `Idle -> HeaderWritten -> BodyWritten -> Done`. The only early exit
//! is before the first pixel is touched; once the header is written the plane is
//! mutated unconditionally.
//!
//! Unveiling: `Idle -> HeaderRead -> Validated -> BodyRead -> CleanedUp -> Done`,
//! or `Rejected` without touching the plane when the header does not validate.
//! Every pixel that was read is whited out before the packet is split, so a
//! [`WhiteoutError::MalformedPacket`] still leaves a wiped plane behind.

use std::path::PathBuf;

use log::debug;

use crate::codec::header::{Header, HeaderCodec, HEADER_PIXELS};
use crate::codec::payload::{self, Completion, PayloadCodec};
use crate::codec::permutation::{adaptive_order, global_order};
use crate::codec::{BitDepth, OccupancyMap, WHITEOUT};
use crate::error::WhiteoutError;
use crate::media::PixelPlane;
use crate::password::Password;
use crate::result::Result;

/// What a hide operation touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReport {
    pub header_pixels: Vec<usize>,
    pub body_pixels: Vec<usize>,
    pub completion: Completion,
}

/// A file recovered from a plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unveiled {
    pub name: String,
    pub content: Vec<u8>,
    /// Every pixel that was read and is now [`WHITEOUT`].
    pub wiped_pixels: Vec<usize>,
    pub completion: Completion,
}

#[derive(Debug)]
pub struct EmbeddingEngine {
    password: Password,
    bit_depth: BitDepth,
}

impl EmbeddingEngine {
    pub fn new<P: Into<Password>>(password: P, bit_depth: BitDepth) -> Self {
        Self {
            password: password.into(),
            bit_depth,
        }
    }

    /// Hides `content` under `name` in `plane`.
    pub fn embed(
        &self,
        plane: &mut PixelPlane,
        name: &str,
        content: &[u8],
    ) -> Result<EmbedReport> {
        if content.is_empty() {
            return Err(WhiteoutError::SourceUnreadable(PathBuf::from(name)));
        }
        ensure_header_fits(plane)?;

        let packet = payload::pack(name, content, &self.password);
        let required = self.bit_depth.pixels_for(packet.len());
        let length = u32::try_from(packet.len()).map_err(|_| WhiteoutError::CapacityExceeded {
            required,
            available: plane.len(),
        })?;

        let seed = self.password.seed();
        let stride = plane.stride();
        let pixels = plane.as_bytes_mut();
        let order = global_order(seed, pixels.len());
        let mut occupancy = OccupancyMap::new(pixels.len());

        let header = Header::new(self.bit_depth, length);
        HeaderCodec::write(pixels, order.as_slice(), &header.to_bytes(), &mut occupancy)?;
        debug!("header written, {} pixels taken", occupancy.count());

        // header bits sit below the masked score bits, the ranking is unaffected
        let pool = adaptive_order(seed, pixels, stride, self.bit_depth, required);
        let body = PayloadCodec::new(self.bit_depth).write(pixels, &pool, &occupancy, &packet)?;
        debug!(
            "body written at {} bit(s), {} pixels from a pool of {}",
            self.bit_depth,
            body.indices.len(),
            pool.len()
        );

        let completion = Completion::new(body.stored_bytes(), packet.len());
        if completion.is_truncated() {
            debug!("candidate pool exhausted, packet {completion}");
        }

        Ok(EmbedReport {
            header_pixels: order.as_slice()[..HEADER_PIXELS].to_vec(),
            body_pixels: body.indices,
            completion,
        })
    }
}

#[derive(Debug)]
pub struct ExtractionEngine {
    password: Password,
}

impl ExtractionEngine {
    pub fn new<P: Into<Password>>(password: P) -> Self {
        Self {
            password: password.into(),
        }
    }

    /// Recovers the hidden file from `plane` and whites out every pixel read.
    pub fn extract(&self, plane: &mut PixelPlane) -> Result<Unveiled> {
        ensure_header_fits(plane)?;

        let seed = self.password.seed();
        let stride = plane.stride();
        let pixels = plane.as_bytes_mut();
        let order = global_order(seed, pixels.len());

        let raw = HeaderCodec::read(pixels, order.as_slice())?;
        let header = Header::parse(&raw.bytes).map_err(|e| {
            debug!("header rejected: {e}");
            e
        })?;
        let length = header.length as usize;
        debug!(
            "header valid, {} bytes at {} bit(s)",
            length, header.bit_depth
        );

        let occupancy = OccupancyMap::from_indices(pixels.len(), &raw.indices);
        let required = header.bit_depth.pixels_for(length);
        let pool = adaptive_order(seed, pixels, stride, header.bit_depth, required);
        let body = PayloadCodec::new(header.bit_depth).read(pixels, &pool, &occupancy, length)?;

        let mut wiped_pixels = raw.indices;
        wiped_pixels.extend_from_slice(&body.indices);
        for &idx in &wiped_pixels {
            pixels[idx] = WHITEOUT;
        }
        debug!("{} pixels whited out", wiped_pixels.len());

        let completion = Completion::new(body.bytes.len(), length);
        if completion.is_truncated() {
            debug!("candidate pool exhausted, packet {completion}");
        }

        let mut packet = body.bytes;
        self.password.apply_keystream(&mut packet);
        let (name, content) = payload::unpack(packet)?;

        Ok(Unveiled {
            name,
            content,
            wiped_pixels,
            completion,
        })
    }
}

fn ensure_header_fits(plane: &PixelPlane) -> Result<()> {
    if plane.len() < HEADER_PIXELS {
        return Err(WhiteoutError::CapacityExceeded {
            required: HEADER_PIXELS,
            available: plane.len(),
        });
    }
    Ok(())
}
